//! Outcome of a single scheduling step.

use std::borrow::Cow;

/// What happened during one call to [`ActionQueue::step`](crate::ActionQueue::step).
///
/// # Tick Semantics
///
/// A step performs at most one action. Entries whose completion check is
/// already satisfied are dropped without being performed and counted in
/// `skipped`; they never cost a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An action was performed.
    Performed {
        /// Label of the performed entry.
        label: Cow<'static, str>,
        /// `true` if the entry stays at the head because its completion
        /// check has not been met yet.
        retained: bool,
        /// Completed entries dropped before reaching this one.
        skipped: usize,
    },

    /// Nothing was performed: the queue was empty, or every remaining entry
    /// was already complete.
    Idle {
        /// Completed entries dropped during this step.
        skipped: usize,
    },
}

impl Step {
    /// Returns `true` if an action was performed.
    #[inline]
    pub fn performed(&self) -> bool {
        matches!(self, Step::Performed { .. })
    }

    /// Number of completed entries dropped during this step.
    #[inline]
    pub fn skipped(&self) -> usize {
        match self {
            Step::Performed { skipped, .. } | Step::Idle { skipped } => *skipped,
        }
    }
}
