use std::time::Duration;

/// Which distribution strategy assigns jobs to workers. Unrecognized
/// values never arise in Rust (the enum is closed); the round-robin
/// fallback described for open-ended configuration surfaces only at
/// [`Strategy::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    RoundRobin,
    Chunked,
    WorkStealing,
    Priority,
}

impl Strategy {
    /// Maps an arbitrary name to a strategy, falling back to round-robin
    /// for anything unrecognized (mirrors the factory contract to keep
    /// behavior defined for config loaded from outside the type system).
    pub fn from_name(name: &str) -> Self {
        match name {
            "chunked" => Strategy::Chunked,
            "work-stealing" | "work_stealing" => Strategy::WorkStealing,
            "priority" => Strategy::Priority,
            "round-robin" | "round_robin" => Strategy::RoundRobin,
            _ => Strategy::RoundRobin,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::RoundRobin => "round-robin",
            Strategy::Chunked => "chunked",
            Strategy::WorkStealing => "work-stealing",
            Strategy::Priority => "priority",
        }
    }
}

const MIN_BUFFER_SIZE: usize = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Pool configuration. Construct with [`Config::new`] or
/// [`Config::default`] and adjust with the `with_*` builder methods;
/// every setter clamps its argument immediately, so a `Config` is always
/// internally valid.
#[derive(Debug, Clone)]
pub struct Config {
    num_workers: usize,
    buffer_size: usize,
    strategy: Strategy,
    timeout: Duration,
    worker_timeout: Option<Duration>,
    max_retries: u32,
    enable_metrics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_workers: 1,
            buffer_size: MIN_BUFFER_SIZE,
            strategy: Strategy::default(),
            timeout: DEFAULT_TIMEOUT,
            worker_timeout: None,
            max_retries: 0,
            enable_metrics: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_workers(mut self, n: usize) -> Self {
        self.num_workers = n.max(1);
        self
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(MIN_BUFFER_SIZE);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Total wall-clock budget for the run. A non-positive duration
    /// (i.e. `Duration::ZERO`) resets to the 5 minute default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() { DEFAULT_TIMEOUT } else { timeout };
        self
    }

    /// Per-attempt deadline. `None` (or `Duration::ZERO`) means no
    /// per-attempt deadline is enforced.
    pub fn with_worker_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.worker_timeout = timeout.filter(|d| !d.is_zero());
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_metrics_enabled(mut self, enabled: bool) -> Self {
        self.enable_metrics = enabled;
        self
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn worker_timeout(&self) -> Option<Duration> {
        self.worker_timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn metrics_enabled(&self) -> bool {
        self.enable_metrics
    }

    pub(crate) fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_num_workers_to_at_least_one() {
        let cfg = Config::new().with_num_workers(0);
        assert_eq!(cfg.num_workers(), 1);
    }

    #[test]
    fn clamps_buffer_size_to_minimum() {
        let cfg = Config::new().with_buffer_size(1);
        assert_eq!(cfg.buffer_size(), MIN_BUFFER_SIZE);
    }

    #[test]
    fn zero_timeout_resets_to_default() {
        let cfg = Config::new().with_timeout(Duration::ZERO);
        assert_eq!(cfg.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn unknown_strategy_name_falls_back_to_round_robin() {
        assert_eq!(Strategy::from_name("quantum"), Strategy::RoundRobin);
    }
}
