//! `ct-agent` — simulated residents and their activity state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`state`]   | `AgentState` — the eleven life-cycle states                     |
//! | [`agent`]   | `Agent` — home, assignments, fatigue, vehicle, pending request  |
//! | [`store`]   | `AgentStore` — stable-handle storage with deferred removal      |
//! | [`intent`]  | `Intent` — requests an agent hands back to the world            |
//! | [`context`] | `AgentContext<'a>` — read-only tick snapshot for the sweep      |
//! | [`machine`] | `step`, `apply_path`, `enter_no_path`                           |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                                  |
//!
//! # Design notes
//!
//! The state machine never touches the path solver directly.  An agent that
//! needs a route returns [`Intent::RequestPath`]; the world resolves tile
//! entrances, submits the request and records its id on the agent.  When the
//! solver later resolves it, the world calls [`machine::apply_path`], which
//! only acts if the agent is still waiting for that exact request and
//! destination.  A late resolution for an agent that has moved on is dropped.
//!
//! Agents are never removed during the sweep.  They are flagged with
//! `marked_for_removal` and compacted by [`AgentStore::remove_marked`] in a
//! separate phase.

pub mod agent;
pub mod context;
pub mod error;
pub mod intent;
pub mod machine;
pub mod state;
pub mod store;


pub use agent::Agent;
pub use context::AgentContext;
pub use error::{AgentError, AgentResult};
pub use intent::Intent;
pub use machine::{PathDelivery, apply_path, enter_no_path, step};
pub use state::AgentState;
pub use store::AgentStore;
