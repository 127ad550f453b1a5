use std::sync::Arc;
use std::thread;

use crossbeam::channel::{bounded, Sender};

use super::DistributionStrategy;
use crate::config::Config;
use crate::error::PoolError;
use crate::exec;
use crate::job::{Job, JobResult};
use crate::processor::Processor;
use crate::scope::RunScope;

/// Job `i` goes to inbox `i mod N`; order within a worker is enqueue
/// order, order across workers is unspecified.
pub struct RoundRobin;

impl<T, R, P> DistributionStrategy<T, R, P> for RoundRobin
where
    T: Send + 'static,
    R: Send + 'static,
    P: Processor<T, R> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "round-robin"
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
        let inbox_capacity = (jobs.len() / num_workers + 1).max(1);
        let mut senders = Vec::with_capacity(num_workers);
        let mut receivers = Vec::with_capacity(num_workers);
        for _ in 0..num_workers {
            let (tx, rx) = bounded(inbox_capacity);
            senders.push(tx);
            receivers.push(rx);
        }

        for (i, job) in jobs.into_iter().enumerate() {
            let inbox = i % num_workers;
            if scope.should_stop() {
                break;
            }
            if senders[inbox].send(job).is_err() {
                log::warn!("round-robin: inbox {inbox} closed early, dropping job");
            }
        }
        senders.clear();

        let mut handles = Vec::with_capacity(num_workers);
        for (worker_id, rx) in receivers.into_iter().enumerate() {
            let processor = Arc::clone(&processor);
            let scope = scope.clone();
            let config = config.clone();
            let results = results.clone();
            let handle = thread::Builder::new()
                .name(format!("jobpool-rr-{worker_id}"))
                .spawn(move || {
                    for job in rx.iter() {
                        if scope.should_stop() {
                            break;
                        }
                        let result = exec::execute(worker_id, job, processor.as_ref(), &config, &scope);
                        if results.send(result).is_err() {
                            log::warn!("round-robin: result channel closed, worker {worker_id} stopping early");
                            break;
                        }
                    }
                })
                .expect("failed to spawn round-robin worker thread");
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
