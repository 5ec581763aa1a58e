//! Game agents driven by action queues.
//!
//! Each [`Agent`] owns an [`action_queue::ActionQueue`] over the shared
//! [`World`] and advances it once per tick. High-level commands such as
//! [`Agent::run_to`] and [`Agent::approach`] are expanded into named entries
//! resolved through the [stock command table](commands::stock_table).
//!
//! # Modules
//!
//! - [`agent`]: agent state machine and commands
//! - [`commands`]: stock named actions and checks
//! - [`world`]: positions, event log, and seeded randomness
//! - [`types`]: entity ids, grid positions, ticks

pub mod agent;
pub mod commands;
pub mod error;
pub mod types;
pub mod world;

pub use agent::{Agent, AgentState, FollowUp, WanderRange};
pub use commands::{CommandTable, args_for, stock_table};
pub use error::{AgentError, Result};
pub use types::{EntityId, Position, Tick};
pub use world::{DEFAULT_INTERACT_RANGE, World, WorldEvent};
