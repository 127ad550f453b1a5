use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crossbeam_utils::CachePadded;
use parking_lot::Mutex;

/// Live counters updated by the orchestrator as results drain in. Cache-padded
/// to keep the hot increment path free of false sharing with neighboring
/// fields, following the same layout `DuplicationStats` uses for its
/// per-thread search counters.
#[derive(Debug, Default)]
pub struct Metrics {
    total_jobs: CachePadded<AtomicU64>,
    processed_jobs: CachePadded<AtomicU64>,
    failed_jobs: CachePadded<AtomicU64>,
    total_duration_nanos: CachePadded<AtomicU64>,
    start_time: Mutex<Option<Instant>>,
    end_time: Mutex<Option<Instant>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_total_jobs(&self, total: usize) {
        self.total_jobs.store(total as u64, Ordering::Release);
    }

    pub(crate) fn mark_started(&self) {
        *self.start_time.lock() = Some(Instant::now());
    }

    pub(crate) fn mark_ended(&self) {
        *self.end_time.lock() = Some(Instant::now());
    }

    pub(crate) fn record_success(&self, duration: Duration) {
        self.processed_jobs.fetch_add(1, Ordering::Relaxed);
        self.total_duration_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self, duration: Duration) {
        self.failed_jobs.fetch_add(1, Ordering::Relaxed);
        self.total_duration_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// By-value snapshot; safe to call concurrently with a running pool.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_jobs = self.total_jobs.load(Ordering::Acquire) as usize;
        let processed_jobs = self.processed_jobs.load(Ordering::Acquire) as usize;
        let failed_jobs = self.failed_jobs.load(Ordering::Acquire) as usize;
        let total_duration = Duration::from_nanos(self.total_duration_nanos.load(Ordering::Acquire));
        let start_time = *self.start_time.lock();
        let end_time = *self.end_time.lock();
        let average_duration = if processed_jobs > 0 {
            total_duration / processed_jobs as u32
        } else {
            Duration::ZERO
        };

        MetricsSnapshot {
            total_jobs,
            processed_jobs,
            failed_jobs,
            start_time,
            end_time,
            total_duration,
            average_duration,
        }
    }
}

/// Point-in-time copy of [`Metrics`], returned from [`crate::Pool::get_metrics`].
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub total_jobs: usize,
    pub processed_jobs: usize,
    pub failed_jobs: usize,
    pub start_time: Option<Instant>,
    pub end_time: Option<Instant>,
    pub total_duration: Duration,
    pub average_duration: Duration,
}

impl MetricsSnapshot {
    /// Returned by [`crate::Pool::get_metrics`] in place of the real
    /// snapshot when `Config::metrics_enabled()` is `false`: metrics are
    /// always computed internally (§3), but a pool configured with
    /// `with_metrics_enabled(false)` does not expose them to callers.
    pub fn disabled() -> Self {
        Self {
            total_jobs: 0,
            processed_jobs: 0,
            failed_jobs: 0,
            start_time: None,
            end_time: None,
            total_duration: Duration::ZERO,
            average_duration: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_duration_is_zero_with_no_successes() {
        let metrics = Metrics::new();
        metrics.set_total_jobs(3);
        metrics.record_failure(Duration::from_millis(5));
        let snap = metrics.snapshot();
        assert_eq!(snap.average_duration, Duration::ZERO);
        assert_eq!(snap.failed_jobs, 1);
    }

    #[test]
    fn average_duration_divides_by_processed_count() {
        let metrics = Metrics::new();
        metrics.record_success(Duration::from_millis(10));
        metrics.record_success(Duration::from_millis(20));
        let snap = metrics.snapshot();
        assert_eq!(snap.processed_jobs, 2);
        assert_eq!(snap.average_duration, Duration::from_millis(15));
    }
}
