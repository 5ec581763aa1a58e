//! Agent errors.

use action_queue::{ArgumentError, QueueError};

use crate::types::EntityId;

/// Errors raised by agent commands and by the actions they enqueue.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The entity is not placed in the world.
    #[error("entity {0} not found in world")]
    UnknownEntity(EntityId),

    /// The entity is already placed in the world.
    #[error("entity {0} already placed in world")]
    DuplicateEntity(EntityId),

    /// A named action received arguments it cannot decode.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// A command could not be enqueued.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl AgentError {
    /// Returns true if the error comes from an unresolvable command name.
    pub fn is_invalid_callable(&self) -> bool {
        matches!(self, Self::Queue(QueueError::InvalidCallable { .. }))
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
