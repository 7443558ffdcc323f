//! `ct-path` — asynchronous, cancellable path requests over the city grids.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`grid`]     | `SearchNode`, `SearchGrid`, `VehicleGrid`, `PlanningGrid`    |
//! | [`solver`]   | `PathSolver` — time-sliced A*, `PathOutcome`, `Resolution`   |
//! | [`preview`]  | `RoadPreview` — cancel-then-resubmit helper for road drags   |
//!
//! # Request protocol
//!
//! A request is created by [`PathSolver::submit`] and resolved exactly once:
//! it is either returned from a later [`PathSolver::advance`] (with a path or
//! [`PathOutcome::NoPath`]) or removed by [`PathSolver::cancel`] before that.
//! Resolutions are returned as values rather than delivered to callbacks, so
//! the caller decides how to apply them; each carries the caller's `token`.

pub mod grid;
pub mod preview;
pub mod solver;


pub use grid::{PlanningGrid, SearchGrid, SearchNode, VehicleGrid};
pub use preview::RoadPreview;
pub use solver::{PathOutcome, PathSolver, Resolution};
