//! Tick-driven action scheduler for game agents.
//!
//! An [`ActionQueue`] holds deferred actions in FIFO order, each paired with an
//! optional completion check. The owning agent calls [`ActionQueue::run`] once
//! per simulation tick; every call performs at most one action.
//!
//! - **FIFO**: entries are appended at the tail and drained from the head
//! - **Retry until complete**: an entry with a completion check is performed
//!   on every tick until its check reports completion
//! - **Skip-through**: entries that are already complete are dropped in the
//!   same tick, so the next pending action does not lose a turn
//! - **One batch at a time**: appending to a queue that has started draining
//!   replaces the whole batch (see [`BatchState`])
//!
//! # Architecture
//!
//! - [`Action`] / [`CompletionCheck`]: the callables an entry is made of
//! - [`ActionRef`] / [`CheckRef`]: a callable given either as a closure with
//!   its arguments bound, or as a registered name plus [`Arguments`]
//! - [`ActionTable`]: registry that resolves named callables
//! - [`Step`]: the outcome of a single tick

pub mod action;
pub mod arguments;
pub mod builder;
pub mod entry;
pub mod error;
pub mod queue;
pub mod step;
pub mod table;

// Re-export core types for ergonomic API
pub use action::{Action, BoxedAction, BoxedCheck, CompletionCheck};
pub use arguments::{ArgumentError, Arguments};
pub use entry::{ActionEntry, ActionRef, CheckRef};
pub use error::{CallableKind, QueueError, Result};
pub use queue::{ActionQueue, BatchState};
pub use step::Step;
pub use table::ActionTable;
