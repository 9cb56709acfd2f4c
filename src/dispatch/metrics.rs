//! Dispatch run records.
//!
//! [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) is the normal entry
//! point. [`Dispatcher::dispatch_verbose`](crate::Dispatcher::dispatch_verbose)
//! additionally records every executor it tried, for debugging rule order
//! and for tests that need to see which executor claimed an action.

use super::DispatchError;
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

/// What happened when one executor was offered the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Mismatch,
    Handled,
    /// The executor claimed the action and its side effect failed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub executor: &'static str,
    pub outcome: AttemptOutcome,
}

/// Outcome of a dispatch bundled with the list of attempts.
#[derive(Debug)]
pub struct DispatchRun {
    /// Executors tried, in order. Stops at the first non-mismatch.
    pub attempts: Vec<Attempt>,
    /// Total elapsed time for the dispatch.
    pub elapsed: Duration,
    pub result: Result<(), DispatchError>,
}

impl DispatchRun {
    /// Name of the executor that handled the action, if any did.
    pub fn handled_by(&self) -> Option<&'static str> {
        self.attempts
            .iter()
            .find(|attempt| attempt.outcome == AttemptOutcome::Handled)
            .map(|attempt| attempt.executor)
    }

    pub fn mismatches(&self) -> usize {
        self.attempts.iter().filter(|attempt| attempt.outcome == AttemptOutcome::Mismatch).count()
    }
}
