use std::sync::Arc;

use crossbeam::channel::bounded;

use crate::config::Config;
use crate::error::PoolError;
use crate::job::{Job, JobResult};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::processor::Processor;
use crate::scope::RunScope;
use crate::strategies;

/// Orchestrates a single run: validate config, start a strategy, drain
/// results, report metrics. A pool is single-use per [`Pool::run`] call;
/// `add_job`/`add_jobs` are only safe to call before `run` starts.
/// `stop`/`get_metrics` are safe to call concurrently with a running pool.
pub struct Pool<T, R, P> {
    config: Config,
    jobs: Vec<Job<T>>,
    processor: Option<Arc<P>>,
    metrics: Arc<Metrics>,
    scope: RunScope,
    _marker: std::marker::PhantomData<R>,
}

impl<T, R, P> Pool<T, R, P>
where
    T: Send + 'static,
    R: Send + 'static,
    P: Processor<T, R> + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::new_with(Config::default())
    }

    pub fn new_with(config: Config) -> Self {
        Self {
            config,
            jobs: Vec::new(),
            processor: None,
            metrics: Arc::new(Metrics::new()),
            scope: RunScope::new(),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn with_processor(mut self, processor: P) -> Self {
        self.processor = Some(Arc::new(processor));
        self
    }

    pub fn add_job(&mut self, mut job: Job<T>) {
        job.stamp_created();
        self.jobs.push(job);
    }

    pub fn add_jobs(&mut self, jobs: impl IntoIterator<Item = Job<T>>) {
        for job in jobs {
            self.add_job(job);
        }
    }

    pub fn get_num_workers(&self) -> usize {
        self.config.num_workers()
    }

    /// By-value snapshot of the run's metrics. Metrics are always
    /// computed internally (§3), but when `Config::metrics_enabled()` is
    /// `false` this returns [`MetricsSnapshot::disabled`] instead of the
    /// real counters, so the flag actually gates exposure rather than
    /// computation.
    pub fn get_metrics(&self) -> MetricsSnapshot {
        if self.config.metrics_enabled() {
            self.metrics.snapshot()
        } else {
            MetricsSnapshot::disabled()
        }
    }

    /// Cancels the run. Idempotent; safe to call from another thread
    /// while `run` is in progress.
    pub fn stop(&self) {
        self.scope.set_stop();
    }

    /// A cloneable cancellation handle sharing this pool's scope. Since
    /// `run` takes `&mut self`, code that wants to call `stop()` from a
    /// concurrent thread while `run` is in flight should take this handle
    /// beforehand and call `RunScope::set_stop` on it instead of trying to
    /// hold a second reference to the pool itself.
    pub fn cancel_handle(&self) -> RunScope {
        self.scope.clone()
    }

    pub fn run(&mut self) -> Result<Vec<JobResult<R>>, PoolError> {
        let processor = self.processor.clone().ok_or(PoolError::NoProcessor)?;
        if self.jobs.is_empty() {
            return Err(PoolError::NoJobs);
        }

        let jobs = std::mem::take(&mut self.jobs);
        let total = jobs.len();
        self.metrics.set_total_jobs(total);
        self.metrics.mark_started();

        let run_scope = self.scope.child_with_timeout(Some(self.config.timeout()));
        let (results_tx, results_rx) = bounded(self.config.buffer_size().max(total));

        let strategy = strategies::for_strategy::<T, R, _>(self.config.strategy());

        log::debug!(
            "jobpool: starting run with strategy={} workers={} jobs={}",
            strategy.name(),
            self.config.num_workers(),
            total
        );

        let config = self.config.clone();
        let strategy_scope = run_scope.clone();
        let strategy_handle = std::thread::Builder::new()
            .name("jobpool-orchestrator".to_string())
            .spawn(move || strategy.execute(strategy_scope, &config, jobs, processor, results_tx))
            .expect("failed to spawn orchestrator thread");

        let mut collected = Vec::with_capacity(total);
        for result in results_rx.iter() {
            if result.is_success() {
                self.metrics.record_success(result.duration);
            } else {
                self.metrics.record_failure(result.duration);
            }
            collected.push(result);
        }

        let strategy_result = strategy_handle.join().expect("strategy thread panicked");
        self.metrics.mark_ended();

        match strategy_result {
            Ok(()) => Ok(collected),
            Err(PoolError::Cancelled { .. }) => Err(PoolError::Cancelled {
                processed: collected.len(),
                total,
            }),
            Err(other) => Err(other),
        }
    }
}

impl<T, R, P> Default for Pool<T, R, P>
where
    T: Send + 'static,
    R: Send + 'static,
    P: Processor<T, R> + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
