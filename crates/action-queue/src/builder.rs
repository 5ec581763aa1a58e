//! Builder utilities for ergonomic entry construction.
//!
//! [`ActionQueue::enqueue`](crate::ActionQueue::enqueue) takes an
//! [`ActionRef`] and an optional [`CheckRef`]. These helpers shorten the
//! common shapes, so a "walk there, then kick" plan reads as:
//!
//! ```rust,ignore
//! queue.enqueue(named("move_toward", args), until_named("within_range", args))?;
//! queue.enqueue(named("kick", args), once())?;
//! ```

use std::borrow::Cow;

use crate::{ActionRef, Arguments, CheckRef};

/// Creates a bound action from a closure.
///
/// Shorthand for `ActionRef::bound(label, action)`.
#[inline]
pub fn action<C, E, F>(label: impl Into<Cow<'static, str>>, action: F) -> ActionRef<C, E>
where
    F: FnMut(&mut C) -> Result<(), E> + Send + 'static,
{
    ActionRef::bound(label, action)
}

/// Creates a named action.
///
/// Shorthand for `ActionRef::named(name, args)`.
#[inline]
pub fn named<C, E>(name: impl Into<String>, args: Arguments) -> ActionRef<C, E> {
    ActionRef::named(name, args)
}

/// No completion check: the action runs once.
#[inline]
pub fn once<C, E>() -> Option<CheckRef<C, E>> {
    None
}

/// Repeats the action until the closure reports completion.
#[inline]
pub fn until<C, E, K>(check: K) -> Option<CheckRef<C, E>>
where
    K: FnMut(&C) -> Result<bool, E> + Send + 'static,
{
    Some(CheckRef::bound(check))
}

/// Repeats the action until the named check reports completion.
#[inline]
pub fn until_named<C, E>(name: impl Into<String>, args: Arguments) -> Option<CheckRef<C, E>> {
    Some(CheckRef::named(name, args))
}
