//! Registry of named callables.
//!
//! Agents receive commands from data (dialogue scripts, map triggers) that
//! name an operation instead of holding it. The [`ActionTable`] maps those
//! names to shared callables, and binds a name plus its [`Arguments`] into a
//! boxed closure when an entry is enqueued. A name that is not registered is
//! not callable.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::action::{BoxedAction, BoxedCheck};
use crate::arguments::Arguments;
use crate::error::{CallableKind, QueueError, Result};

type SharedAction<C, E> =
    Arc<dyn Fn(&mut C, &Arguments) -> std::result::Result<(), E> + Send + Sync>;
type SharedCheck<C, E> =
    Arc<dyn Fn(&C, &Arguments) -> std::result::Result<bool, E> + Send + Sync>;

/// Named actions and completion checks available to a queue.
pub struct ActionTable<C, E> {
    actions: HashMap<String, SharedAction<C, E>>,
    checks: HashMap<String, SharedCheck<C, E>>,
}

impl<C, E> Default for ActionTable<C, E> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
            checks: HashMap::new(),
        }
    }
}

impl<C: 'static, E: 'static> ActionTable<C, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action under `name`, replacing any previous one.
    pub fn register_action<F>(&mut self, name: impl Into<String>, action: F) -> &mut Self
    where
        F: Fn(&mut C, &Arguments) -> std::result::Result<(), E> + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Arc::new(action));
        self
    }

    /// Registers a completion check under `name`, replacing any previous one.
    pub fn register_check<F>(&mut self, name: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn(&C, &Arguments) -> std::result::Result<bool, E> + Send + Sync + 'static,
    {
        self.checks.insert(name.into(), Arc::new(check));
        self
    }

    /// Builder form of [`register_action`](Self::register_action).
    #[must_use]
    pub fn with_action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut C, &Arguments) -> std::result::Result<(), E> + Send + Sync + 'static,
    {
        self.register_action(name, action);
        self
    }

    /// Builder form of [`register_check`](Self::register_check).
    #[must_use]
    pub fn with_check<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&C, &Arguments) -> std::result::Result<bool, E> + Send + Sync + 'static,
    {
        self.register_check(name, check);
        self
    }

    /// Binds the action `name` to `args`.
    ///
    /// # Errors
    ///
    /// [`QueueError::InvalidCallable`] if no action is registered under `name`.
    pub fn bind_action(&self, name: &str, args: Arguments) -> Result<BoxedAction<C, E>> {
        let action = self
            .actions
            .get(name)
            .cloned()
            .ok_or_else(|| QueueError::invalid(CallableKind::Action, name))?;

        Ok(Box::new(move |ctx: &mut C| action(ctx, &args)))
    }

    /// Binds the completion check `name` to `args`.
    ///
    /// # Errors
    ///
    /// [`QueueError::InvalidCallable`] if no check is registered under `name`.
    pub fn bind_check(&self, name: &str, args: Arguments) -> Result<BoxedCheck<C, E>> {
        let check = self
            .checks
            .get(name)
            .cloned()
            .ok_or_else(|| QueueError::invalid(CallableKind::Check, name))?;

        Ok(Box::new(move |ctx: &C| check(ctx, &args)))
    }
}

impl<C, E> ActionTable<C, E> {
    pub fn contains_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn contains_check(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    /// Registered action names, sorted.
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered check names, sorted.
    pub fn check_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.checks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<C, E> fmt::Debug for ActionTable<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTable")
            .field("actions", &self.action_names())
            .field("checks", &self.check_names())
            .finish()
    }
}
