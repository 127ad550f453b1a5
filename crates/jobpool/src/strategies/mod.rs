mod chunked;
mod priority;
mod round_robin;
mod work_stealing;

use std::sync::Arc;

use crossbeam::channel::Sender;

use crate::config::{Config, Strategy};
use crate::error::PoolError;
use crate::job::{Job, JobResult};
use crate::processor::Processor;
use crate::scope::RunScope;

/// A pluggable job-distribution strategy. Implementations own starting
/// workers, feeding them jobs, and closing `results` exactly once after
/// every worker has exited — the orchestrator in [`crate::pool`] never
/// touches worker threads directly.
pub trait DistributionStrategy<T, R, P>: Send + Sync
where
    P: Processor<T, R>,
{
    fn name(&self) -> &'static str;

    fn execute(
        &self,
        scope: RunScope,
        config: &Config,
        jobs: Vec<Job<T>>,
        processor: Arc<P>,
        results: Sender<JobResult<R>>,
    ) -> Result<(), PoolError>;
}

/// Maps a [`Strategy`] to its concrete implementation. There is no
/// fallback here because [`Strategy::from_name`] already collapses
/// unrecognized input to [`Strategy::RoundRobin`] before this is called.
pub fn for_strategy<T, R, P>(strategy: Strategy) -> Box<dyn DistributionStrategy<T, R, P>>
where
    T: Send + 'static,
    R: Send + 'static,
    P: Processor<T, R> + Send + Sync + 'static,
{
    match strategy {
        Strategy::RoundRobin => Box::new(round_robin::RoundRobin),
        Strategy::Chunked => Box::new(chunked::Chunked),
        Strategy::WorkStealing => Box::new(work_stealing::WorkStealing),
        Strategy::Priority => Box::new(priority::Priority),
    }
}
