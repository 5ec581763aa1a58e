//! The action queue.
//!
//! An [`ActionQueue`] drives an agent's behaviour over several ticks. Each
//! entry pairs an action with an optional completion check:
//!
//! - **No check**: the action is performed once and leaves the queue
//! - **Check not met**: the action is performed again and stays at the head
//! - **Check met**: the entry leaves without being performed, and the next
//!   entry is examined in the same tick
//!
//! "Walk toward him, and once in range, kick him" becomes two entries: a
//! movement action checked by a range predicate, followed by a single-shot
//! kick.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::action::BoxedCheck;
use crate::arguments::Arguments;
use crate::entry::{ActionEntry, ActionRef, CheckRef};
use crate::error::{CallableKind, QueueError, Result};
use crate::step::Step;
use crate::table::ActionTable;

/// Whether the queue has started draining its current batch.
///
/// # Batch Policy
///
/// A batch is the set of entries enqueued between two drains. The first
/// [`ActionQueue::run`] over a non-empty queue moves it to `Draining`. Any
/// entry enqueued while `Draining` starts a new batch: every entry still in
/// the queue is discarded before the new one is appended, and the state
/// returns to `Idle`. Callers re-issue a whole plan (for example on every
/// click) and never accumulate stale entries from the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BatchState {
    /// Entries are being collected; nothing has run since the last new batch.
    #[default]
    Idle,
    /// At least one step has run over the current batch.
    Draining,
}

impl BatchState {
    #[inline]
    pub fn is_draining(self) -> bool {
        matches!(self, BatchState::Draining)
    }
}

/// FIFO scheduler of deferred actions, advanced one step per tick.
///
/// `C` is the context lent to the callables on every step (the owner's view
/// of the world); the queue never owns it. `E` is the error type callables
/// fail with; such errors are returned unchanged from [`run`](Self::run).
pub struct ActionQueue<C, E> {
    entries: VecDeque<ActionEntry<C, E>>,
    batch: BatchState,
    table: Option<Arc<ActionTable<C, E>>>,
}

impl<C, E> Default for ActionQueue<C, E> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            batch: BatchState::Idle,
            table: None,
        }
    }
}

impl<C, E> ActionQueue<C, E> {
    /// Creates an empty queue without a table: only bound callables are accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue that resolves named callables against `table`.
    pub fn with_table(table: Arc<ActionTable<C, E>>) -> Self {
        Self {
            table: Some(table),
            ..Self::default()
        }
    }

    pub fn table(&self) -> Option<&Arc<ActionTable<C, E>>> {
        self.table.as_ref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` once a step has run over the current batch.
    pub fn is_running(&self) -> bool {
        self.batch.is_draining()
    }

    pub fn batch_state(&self) -> BatchState {
        self.batch
    }

    /// Label of the entry that the next step will examine first.
    pub fn front_label(&self) -> Option<&str> {
        self.entries.front().map(ActionEntry::label)
    }

    /// Labels of all entries, head first.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(ActionEntry::label)
    }

    /// Removes the head entry, if any.
    pub fn pop_front(&mut self) {
        if let Some(entry) = self.entries.pop_front() {
            trace!(label = %entry.label, "removed head action");
        }
    }

    /// Discards all entries.
    ///
    /// The batch state is left alone; only a new batch resets it.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Runs one scheduling step and reports whether an action was performed.
    ///
    /// Returns `Ok(false)` when the queue is empty or every remaining entry
    /// was already complete; this is how the owner detects a drained queue.
    pub fn run(&mut self, ctx: &mut C) -> std::result::Result<bool, E> {
        self.step(ctx).map(|step| step.performed())
    }

    /// Runs one scheduling step.
    ///
    /// Performs at most one action. Entries whose completion check is met are
    /// dropped without being performed until an entry needs work.
    ///
    /// # Errors
    ///
    /// Errors from an action or a completion check are returned unchanged.
    /// An entry only leaves the queue after its action succeeded or its
    /// check reported completion; a failing entry stays at the head.
    pub fn step(&mut self, ctx: &mut C) -> std::result::Result<Step, E> {
        if self.entries.is_empty() {
            return Ok(Step::Idle { skipped: 0 });
        }

        self.batch = BatchState::Draining;

        let mut skipped = 0;
        while let Some(head) = self.entries.front_mut() {
            let complete = match head.completion.as_mut() {
                Some(check) => check.is_complete(ctx)?,
                None => {
                    head.action.perform(ctx)?;
                    let label = head.label.clone();
                    self.entries.pop_front();
                    trace!(%label, skipped, "performed single-shot action");
                    return Ok(Step::Performed {
                        label,
                        retained: false,
                        skipped,
                    });
                }
            };

            if complete {
                debug!(label = %head.label, "action complete, advancing");
                self.entries.pop_front();
                skipped += 1;
                continue;
            }

            head.action.perform(ctx)?;
            trace!(label = %head.label, skipped, "performed action, awaiting completion");
            return Ok(Step::Performed {
                label: head.label.clone(),
                retained: true,
                skipped,
            });
        }

        Ok(Step::Idle { skipped })
    }

    /// Appends a resolved entry, starting a new batch if the current one is draining.
    fn append(&mut self, entry: ActionEntry<C, E>) {
        if self.batch.is_draining() {
            if !self.entries.is_empty() {
                debug!(
                    discarded = self.entries.len(),
                    "new batch replaces a draining queue"
                );
            }
            self.clear();
            self.batch = BatchState::Idle;
        }

        trace!(label = %entry.label, position = self.entries.len(), "enqueued action");
        self.entries.push_back(entry);
    }
}

impl<C: 'static, E: 'static> ActionQueue<C, E> {
    /// Enqueues an action with an optional completion check.
    ///
    /// Without a check the action runs once. With a check, the action is
    /// performed on every step until the check is met.
    ///
    /// If the queue is draining (see [`BatchState`]), every pending entry is
    /// discarded first and this entry starts a new batch.
    ///
    /// # Errors
    ///
    /// [`QueueError::InvalidCallable`] if a named action or check cannot be
    /// resolved. Nothing is discarded or appended in that case.
    pub fn enqueue(
        &mut self,
        action: ActionRef<C, E>,
        completion: Option<CheckRef<C, E>>,
    ) -> Result<()> {
        // Resolve both sides before touching the queue
        let (label, action) = match action {
            ActionRef::Bound { label, action } => (label, action),
            ActionRef::Named { name, args } => {
                let bound = self
                    .resolve_table(CallableKind::Action, &name)?
                    .bind_action(&name, args)?;
                (Cow::Owned(name), bound)
            }
        };
        let completion = completion.map(|check| self.resolve_check(check)).transpose()?;

        self.append(ActionEntry {
            label,
            action,
            completion,
        });
        Ok(())
    }

    /// Enqueues a named action with positional arguments only.
    ///
    /// Shorthand for [`enqueue`](Self::enqueue) with empty named arguments on
    /// both the action and the completion check.
    pub fn enqueue_simple(
        &mut self,
        action: &str,
        action_args: Vec<Value>,
        completion: Option<&str>,
        completion_args: Vec<Value>,
    ) -> Result<()> {
        let completion =
            completion.map(|name| CheckRef::named(name, Arguments::positional(completion_args)));
        self.enqueue(
            ActionRef::named(action, Arguments::positional(action_args)),
            completion,
        )
    }

    /// Enqueues a single-shot closure.
    pub fn push<F>(&mut self, action: F)
    where
        F: FnMut(&mut C) -> std::result::Result<(), E> + Send + 'static,
    {
        self.push_labelled("action", action);
    }

    /// Enqueues a single-shot closure under a diagnostic label.
    pub fn push_labelled<F>(&mut self, label: impl Into<Cow<'static, str>>, action: F)
    where
        F: FnMut(&mut C) -> std::result::Result<(), E> + Send + 'static,
    {
        self.append(ActionEntry {
            label: label.into(),
            action: Box::new(action),
            completion: None,
        });
    }

    /// Enqueues a closure that is performed on every step until `check` is met.
    pub fn push_until<F, K>(&mut self, action: F, check: K)
    where
        F: FnMut(&mut C) -> std::result::Result<(), E> + Send + 'static,
        K: FnMut(&C) -> std::result::Result<bool, E> + Send + 'static,
    {
        self.append(ActionEntry {
            label: Cow::Borrowed("action"),
            action: Box::new(action),
            completion: Some(Box::new(check)),
        });
    }

    fn resolve_table(&self, kind: CallableKind, name: &str) -> Result<&ActionTable<C, E>> {
        self.table
            .as_deref()
            .ok_or_else(|| QueueError::invalid(kind, name))
    }

    fn resolve_check(&self, check: CheckRef<C, E>) -> Result<BoxedCheck<C, E>> {
        match check {
            CheckRef::Bound(check) => Ok(check),
            CheckRef::Named { name, args } => self
                .resolve_table(CallableKind::Check, &name)?
                .bind_check(&name, args),
        }
    }
}

impl<C, E> fmt::Debug for ActionQueue<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionQueue")
            .field("entries", &self.labels().collect::<Vec<_>>())
            .field("batch", &self.batch)
            .field("table", &self.table.is_some())
            .finish()
    }
}
