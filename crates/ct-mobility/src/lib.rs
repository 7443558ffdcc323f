//! `ct-mobility` — vehicles driving along lane-level waypoints.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`vehicle`] | `Vehicle` — position, waypoint queue, heading, probe points       |
//! | [`traffic`] | `TrafficSnapshot` — R-tree of back probes, `throttle_flags`       |
//!
//! # Movement model
//!
//! Each tick a vehicle heads straight for its next waypoint (`atan2` of the
//! offset) at its fixed cruising speed.  If its front probe lies within the
//! combined touch radii of another vehicle's back probe it crawls at a fixed
//! fraction of that speed instead of stopping, so two vehicles meeting at a
//! junction always make progress.  A waypoint is consumed once the vehicle
//! is closer to it than twice this tick's displacement; an empty queue means
//! the vehicle has arrived.
//!
//! Collision decisions for a tick are all taken against one
//! [`TrafficSnapshot`] built before anyone moves, so the outcome does not
//! depend on the order vehicles are updated in.

pub mod traffic;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use traffic::{TrafficSnapshot, throttle_flags};
pub use vehicle::{MoveOutcome, Vehicle};
