use std::sync::Arc;
use std::thread;

use crossbeam::channel::Sender;

use super::DistributionStrategy;
use crate::config::Config;
use crate::error::PoolError;
use crate::exec;
use crate::job::{Job, JobResult};
use crate::processor::Processor;
use crate::scope::RunScope;

/// Partitions jobs into `num_workers` contiguous slices of size
/// `ceil(L/N)` or `floor(L/N)` (the first `L mod N` workers get the
/// larger slice) and runs each slice sequentially on its own worker.
/// Maximizes locality at the cost of no dynamic load balancing.
pub struct Chunked;

fn chunk_bounds(len: usize, num_workers: usize) -> Vec<(usize, usize)> {
    let base = len / num_workers;
    let remainder = len % num_workers;
    let mut bounds = Vec::with_capacity(num_workers);
    let mut start = 0;
    for w in 0..num_workers {
        let size = base + if w < remainder { 1 } else { 0 };
        let end = start + size;
        bounds.push((start, end));
        start = end;
    }
    bounds
}

impl<T, R, P> DistributionStrategy<T, R, P> for Chunked
where
    T: Send + 'static,
    R: Send + 'static,
    P: Processor<T, R> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "chunked"
    }

    fn execute(
        &self,
        scope: RunScope,
        config: &Config,
        jobs: Vec<Job<T>>,
        processor: Arc<P>,
        results: Sender<JobResult<R>>,
    ) -> Result<(), PoolError> {
        let num_workers = config.num_workers();
        let bounds = chunk_bounds(jobs.len(), num_workers);

        let mut remaining = jobs;
        let mut chunks = Vec::with_capacity(num_workers);
        let mut taken = 0;
        for (start, end) in &bounds {
            let size = end - start;
            debug_assert_eq!(*start, taken);
            let chunk: Vec<Job<T>> = remaining.drain(0..size).collect();
            taken += size;
            chunks.push(chunk);
        }

        let mut handles = Vec::with_capacity(num_workers);
        for (worker_id, chunk) in chunks.into_iter().enumerate() {
            let processor = Arc::clone(&processor);
            let scope = scope.clone();
            let config = config.clone();
            let results = results.clone();
            let handle = thread::Builder::new()
                .name(format!("jobpool-chunk-{worker_id}"))
                .spawn(move || {
                    for job in chunk {
                        if scope.should_stop() {
                            break;
                        }
                        let result = exec::execute(worker_id, job, processor.as_ref(), &config, &scope);
                        if results.send(result).is_err() {
                            log::warn!("chunked: result channel closed, worker {worker_id} stopping early");
                            break;
                        }
                    }
                })
                .expect("failed to spawn chunked worker thread");
            handles.push(handle);
        }

        for handle in handles {
            let _ = handle.join();
        }

        if scope.should_stop() {
            return Err(PoolError::Cancelled { processed: 0, total: 0 });
        }
        Ok(())
    }
}
