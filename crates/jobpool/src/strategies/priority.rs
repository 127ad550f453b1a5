use std::sync::Arc;
use std::thread;

use crossbeam::channel::{bounded, Sender};

use super::DistributionStrategy;
use crate::config::Config;
use crate::error::PoolError;
use crate::exec;
use crate::heap::PriorityHeap;
use crate::job::{Job, JobResult};
use crate::processor::Processor;
use crate::scope::RunScope;

/// A single dispatcher thread drains the priority heap into one shared
/// bounded channel, strictly in (priority desc, created asc) order. N
/// workers consume the channel uniformly, so ordering decisions stay
/// serialized in the dispatcher while workers absorb processor latency.
pub struct Priority;

impl<T, R, P> DistributionStrategy<T, R, P> for Priority
where
    T: Send + 'static,
    R: Send + 'static,
    P: Processor<T, R> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "priority"
    }

    fn execute(
        &self,
        scope: RunScope,
        config: &Config,
        jobs: Vec<Job<T>>,
        processor: Arc<P>,
        results: Sender<JobResult<R>>,
    ) -> Result<(), PoolError> {
        let mut heap = PriorityHeap::new();
        for job in jobs {
            heap.push(job);
        }

        let (job_tx, job_rx) = bounded::<Job<T>>(config.buffer_size());

        let dispatcher_scope = scope.clone();
        let dispatcher = thread::Builder::new()
            .name("jobpool-priority-dispatcher".to_string())
            .spawn(move || {
                while let Some(job) = heap.pop() {
                    if dispatcher_scope.should_stop() {
                        break;
                    }
                    if job_tx.send(job).is_err() {
                        log::warn!("priority: dispatcher channel closed, stopping early");
                        break;
                    }
                }
            })
            .expect("failed to spawn priority dispatcher thread");

        let num_workers = config.num_workers();
        let mut handles = Vec::with_capacity(num_workers);
        for worker_id in 0..num_workers {
            let processor = Arc::clone(&processor);
            let scope = scope.clone();
            let config = config.clone();
            let results = results.clone();
            let job_rx = job_rx.clone();
            let handle = thread::Builder::new()
                .name(format!("jobpool-priority-{worker_id}"))
                .spawn(move || {
                    for job in job_rx.iter() {
                        if scope.should_stop() {
                            break;
                        }
                        let result = exec::execute(worker_id, job, processor.as_ref(), &config, &scope);
                        if results.send(result).is_err() {
                            log::warn!("priority: result channel closed, worker {worker_id} stopping early");
                            break;
                        }
                    }
                })
                .expect("failed to spawn priority worker thread");
            handles.push(handle);
        }

        let _ = dispatcher.join();
        for handle in handles {
            let _ = handle.join();
        }

        if scope.should_stop() {
            return Err(PoolError::Cancelled { processed: 0, total: 0 });
        }
        Ok(())
    }
}
