//! Stale-response guard for overlapping fetches.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing request sequence for one store concern.
///
/// A fetch records the sequence it was issued under; when it completes it
/// only applies its result if no later fetch has been issued since.
#[derive(Debug, Default)]
pub struct RequestGuard {
    seq: AtomicU64,
}

impl RequestGuard {
    /// Issue a new request sequence number.
    pub fn begin(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `seq` is still the latest issued request.
    pub fn is_current(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request_stays_current() {
        let guard = RequestGuard::default();
        let seq = guard.begin();
        assert!(guard.is_current(seq));
    }

    #[test]
    fn test_later_request_invalidates_earlier() {
        let guard = RequestGuard::default();
        let first = guard.begin();
        let second = guard.begin();

        // The first in-flight request completes late: its result is stale
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }
}
