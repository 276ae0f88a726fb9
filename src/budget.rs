//! Wall-clock and cancellation limits shared by every search strategy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How many search steps pass between checks of the clock and the flag.
pub const POLL_INTERVAL: u64 = 256;

/// Limits for one matching run. The default budget never runs out.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Stop searching `limit` from now.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Instant::now().checked_add(limit);
        self
    }

    /// Stop searching once `flag` becomes `true` (e.g. from a Ctrl+C handler).
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn is_exhausted(&self) -> bool {
        if self
            .cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
        {
            return true;
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Start a step counter that polls this budget every [`POLL_INTERVAL`] steps.
    pub(crate) fn meter(&self) -> Meter<'_> {
        Meter {
            budget: self,
            steps: 0,
            exhausted: false,
        }
    }
}

pub(crate) struct Meter<'a> {
    budget: &'a Budget,
    steps: u64,
    exhausted: bool,
}

impl Meter<'_> {
    /// Count one step; `false` once the budget has run out.
    pub(crate) fn tick(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        self.steps += 1;
        if self.steps % POLL_INTERVAL == 0 && self.budget.is_exhausted() {
            self.exhausted = true;
        }
        !self.exhausted
    }

    pub(crate) fn steps(&self) -> u64 {
        self.steps
    }

    pub(crate) fn exhausted(&self) -> bool {
        self.exhausted
    }
}
