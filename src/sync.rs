//! Cancellation flag shared between a session owner and its timer thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A thread-safe stop flag.
///
/// Clones share the same flag; once any clone calls `stop`, every clone
/// observes it.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_lifecycle() {
        let flag = StopFlag::new();
        assert!(!flag.is_stopped());

        flag.stop();
        assert!(flag.is_stopped());
    }

    #[test]
    fn test_stop_flag_clone_shares_state() {
        let flag = StopFlag::new();
        let seen_by_thread = flag.clone();

        flag.stop();
        assert!(seen_by_thread.is_stopped());
    }
}
