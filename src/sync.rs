//! Synchronization primitives for search control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A thread-safe stop flag for cooperative search cancellation.
///
/// There is exactly one search in flight per process; the front-end sets the
/// flag on an external `stop` command and the search sets it itself when the
/// clock runs out. The search polls it at every node before recursing.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Check if the stop flag is set.
    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Set the stop flag.
    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear the stop flag.
    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_flag_lifecycle() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());

        flag.stop();
        assert!(flag.is_stopped());

        flag.reset();
        assert!(!flag.is_stopped());
    }

    #[test]
    fn stop_flag_shared_across_clones() {
        let flag = StopFlag::new();
        let other = flag.clone();

        flag.stop();
        assert!(other.is_stopped());
    }
}
