//! Queue entries and the references they are built from.

use std::borrow::Cow;
use std::fmt;

use crate::action::{Action, BoxedAction, BoxedCheck, CompletionCheck};
use crate::arguments::Arguments;

/// An action handed to [`ActionQueue::enqueue`](crate::ActionQueue::enqueue).
///
/// `Bound` callables are invocable by construction. `Named` callables are
/// resolved against the queue's [`ActionTable`](crate::ActionTable) when they
/// are enqueued, and rejected if the name is unknown.
pub enum ActionRef<C, E> {
    Bound {
        label: Cow<'static, str>,
        action: BoxedAction<C, E>,
    },
    Named {
        name: String,
        args: Arguments,
    },
}

impl<C, E> ActionRef<C, E> {
    /// Wraps a closure whose arguments are already captured.
    pub fn bound<F>(label: impl Into<Cow<'static, str>>, action: F) -> Self
    where
        F: FnMut(&mut C) -> Result<(), E> + Send + 'static,
    {
        Self::Bound {
            label: label.into(),
            action: Box::new(action),
        }
    }

    /// Wraps any [`Action`] implementation.
    pub fn from_action<A>(label: impl Into<Cow<'static, str>>, action: A) -> Self
    where
        A: Action<C, E> + 'static,
    {
        Self::Bound {
            label: label.into(),
            action: Box::new(action),
        }
    }

    /// References a callable registered under `name`.
    pub fn named(name: impl Into<String>, args: Arguments) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Bound { label, .. } => label,
            Self::Named { name, .. } => name,
        }
    }
}

impl<C, E> fmt::Debug for ActionRef<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound { label, .. } => f.debug_struct("Bound").field("label", label).finish(),
            Self::Named { name, args } => f
                .debug_struct("Named")
                .field("name", name)
                .field("args", args)
                .finish(),
        }
    }
}

/// A completion check handed to [`ActionQueue::enqueue`](crate::ActionQueue::enqueue).
pub enum CheckRef<C, E> {
    Bound(BoxedCheck<C, E>),
    Named { name: String, args: Arguments },
}

impl<C, E> CheckRef<C, E> {
    pub fn bound<F>(check: F) -> Self
    where
        F: FnMut(&C) -> Result<bool, E> + Send + 'static,
    {
        Self::Bound(Box::new(check))
    }

    pub fn from_check<K>(check: K) -> Self
    where
        K: CompletionCheck<C, E> + 'static,
    {
        Self::Bound(Box::new(check))
    }

    pub fn named(name: impl Into<String>, args: Arguments) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }
}

impl<C, E> fmt::Debug for CheckRef<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound(_) => f.write_str("Bound(..)"),
            Self::Named { name, args } => f
                .debug_struct("Named")
                .field("name", name)
                .field("args", args)
                .finish(),
        }
    }
}

/// A resolved unit of work held by the queue.
pub struct ActionEntry<C, E> {
    pub(crate) label: Cow<'static, str>,
    pub(crate) action: BoxedAction<C, E>,
    pub(crate) completion: Option<BoxedCheck<C, E>>,
}

impl<C, E> ActionEntry<C, E> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` if the entry leaves the queue after a single run.
    pub fn is_single_shot(&self) -> bool {
        self.completion.is_none()
    }
}

impl<C, E> fmt::Debug for ActionEntry<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionEntry")
            .field("label", &self.label)
            .field("single_shot", &self.is_single_shot())
            .finish()
    }
}
