//! Callable traits.
//!
//! This module defines the two kinds of callables a queue entry is made of:
//! the [`Action`] that does the work, and the optional [`CompletionCheck`]
//! that decides whether the work is done. Both are generic over the context
//! `C` lent to the queue for one tick and the error type `E` they may fail
//! with.

/// A deferred operation with its arguments already bound.
pub trait Action<C, E>: Send {
    /// Perform the action once against the given context.
    ///
    /// # Errors
    ///
    /// Any error is returned unchanged to the caller of
    /// [`ActionQueue::run`](crate::ActionQueue::run).
    fn perform(&mut self, ctx: &mut C) -> Result<(), E>;
}

/// A deferred predicate deciding whether an entry has reached its goal.
pub trait CompletionCheck<C, E>: Send {
    /// Returns `Ok(true)` once the entry should leave the queue without
    /// being performed again.
    fn is_complete(&mut self, ctx: &C) -> Result<bool, E>;
}

/// Any `FnMut(&mut C) -> Result<(), E>` closure is an action.
impl<C, E, F> Action<C, E> for F
where
    F: FnMut(&mut C) -> Result<(), E> + Send,
{
    #[inline]
    fn perform(&mut self, ctx: &mut C) -> Result<(), E> {
        self(ctx)
    }
}

/// Any `FnMut(&C) -> Result<bool, E>` closure is a completion check.
impl<C, E, F> CompletionCheck<C, E> for F
where
    F: FnMut(&C) -> Result<bool, E> + Send,
{
    #[inline]
    fn is_complete(&mut self, ctx: &C) -> Result<bool, E> {
        self(ctx)
    }
}

/// Owned, type-erased action stored in a queue entry.
pub type BoxedAction<C, E> = Box<dyn Action<C, E>>;

/// Owned, type-erased completion check stored in a queue entry.
pub type BoxedCheck<C, E> = Box<dyn CompletionCheck<C, E>>;
