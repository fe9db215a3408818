//! Run-scoped tally of successful transfers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Concurrency-safe success counter.
///
/// Each orchestrator run owns a fresh counter and hands clones to its
/// transfer units; clones share the same tally.
#[derive(Debug, Clone, Default)]
pub struct SuccessCounter {
    count: Arc<AtomicUsize>,
}

impl SuccessCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful transfer.
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    /// Current number of recorded successes.
    pub fn get(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}
