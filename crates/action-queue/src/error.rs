//! Queue errors.

use std::fmt;

/// Which side of an entry a callable belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallableKind {
    Action,
    Check,
}

impl CallableKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Check => "completion check",
        }
    }
}

impl fmt::Display for CallableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while inserting entries into an [`ActionQueue`](crate::ActionQueue).
///
/// Errors raised by the callables themselves are not wrapped here; they are
/// returned unchanged from [`ActionQueue::run`](crate::ActionQueue::run).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// A named callable could not be resolved to anything invocable.
    ///
    /// The queue is left unmodified.
    #[error("{kind} `{name}` is not callable")]
    InvalidCallable { kind: CallableKind, name: String },
}

impl QueueError {
    pub(crate) fn invalid(kind: CallableKind, name: impl Into<String>) -> Self {
        Self::InvalidCallable {
            kind,
            name: name.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QueueError>;
