use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cancellation context shared by the orchestrator, dispatcher, and every
/// worker in a run. Mirrors the `should_stop`/`set_stop` shape of a shared
/// search-state flag: a single `Arc<AtomicBool>`, checked cooperatively at
/// every suspension point named in the concurrency model (between jobs,
/// between retry attempts, around blocking sends/receives).
#[derive(Clone)]
pub struct RunScope {
    stop: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl RunScope {
    pub fn new() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            deadline: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// True once `stop()` was called, or once the scope's own deadline
    /// (if any) has elapsed.
    pub fn should_stop(&self) -> bool {
        if self.stop.load(Ordering::Acquire) {
            return true;
        }
        matches!(self.deadline, Some(d) if Instant::now() >= d)
    }

    /// Idempotent: safe to call from `Pool::stop()` concurrently with a
    /// running pool, and safe to call more than once.
    pub fn set_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Derives a child scope sharing this scope's cancel flag, with a
    /// deadline tightened to `min(self.deadline, now + attempt_timeout)`.
    /// Used by the per-job execution primitive to bound a single attempt
    /// without losing the run-wide cancel signal.
    pub fn child_with_timeout(&self, attempt_timeout: Option<Duration>) -> Self {
        let candidate = attempt_timeout.map(|d| Instant::now() + d);
        let deadline = match (self.deadline, candidate) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        };
        Self {
            stop: Arc::clone(&self.stop),
            deadline,
        }
    }
}

impl Default for RunScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_observed_through_clones() {
        let scope = RunScope::new();
        let clone = scope.clone();
        assert!(!clone.should_stop());
        scope.set_stop();
        assert!(clone.should_stop());
    }

    #[test]
    fn deadline_triggers_should_stop() {
        let scope = RunScope::with_timeout(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(scope.should_stop());
    }

    #[test]
    fn child_scope_inherits_parent_cancel() {
        let parent = RunScope::new();
        let child = parent.child_with_timeout(Some(Duration::from_secs(60)));
        parent.set_stop();
        assert!(child.should_stop());
    }

    #[test]
    fn child_scope_tightens_deadline() {
        let parent = RunScope::with_timeout(Duration::from_secs(60));
        let child = parent.child_with_timeout(Some(Duration::from_millis(1)));
        std::thread::sleep(Duration::from_millis(5));
        assert!(child.should_stop());
        assert!(!parent.should_stop());
    }
}
