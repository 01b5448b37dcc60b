//! Knobs and signals shared by one run of the evaluator

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default number of live scopes above which a top-level `eval` collects.
pub const DEFAULT_GC_THRESHOLD: usize = 1024;

/// Limits and the cancellation flag for a run of the evaluator.
///
/// Cloning shares the cancellation flag, so a clone handed to another
/// thread (a Ctrl-C handler, a watchdog) can stop a running program.
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Deepest permitted nesting of function calls; `None` means only the
    /// host stack bounds recursion.
    pub max_call_depth: Option<usize>,

    /// Raised to make the evaluator stop at its next expression.
    pub interrupt: Arc<AtomicBool>,

    /// Live scope count that triggers a collection after a top-level `eval`
    pub gc_threshold: usize,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_call_depth: None,
            interrupt: Arc::default(),
            gc_threshold: DEFAULT_GC_THRESHOLD,
        }
    }
}

impl EvalContext {
    /// Unlimited call depth, default collection threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail calls nested deeper than `max_depth` with a stack overflow error.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            max_call_depth: Some(max_depth),
            ..Self::default()
        }
    }

    /// Whether [`EvalContext::interrupt`] has been called since the last reset.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Ask every evaluation sharing this flag to stop.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Clear a previous [`EvalContext::interrupt`] so evaluation can resume.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }
}
