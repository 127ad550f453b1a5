use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::Sender;

use super::DistributionStrategy;
use crate::config::Config;
use crate::deque::WorkStealingDeque;
use crate::error::PoolError;
use crate::exec;
use crate::job::{Job, JobResult};
use crate::processor::Processor;
use crate::scope::RunScope;

/// Seeds one deque per worker round-robin, then lets idle workers steal
/// from `(my_id + attempt) mod N` neighbors before giving up. Termination
/// relies on seeding completing before any worker starts: since workers
/// never produce new jobs, once every deque is observed empty no further
/// work can appear.
pub struct WorkStealing;

impl<T, R, P> DistributionStrategy<T, R, P> for WorkStealing
where
    T: Send + 'static,
    R: Send + 'static,
    P: Processor<T, R> + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "work-stealing"
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
        let deques: Vec<Arc<WorkStealingDeque<Job<T>>>> =
            (0..num_workers).map(|_| Arc::new(WorkStealingDeque::new())).collect();

        for (i, job) in jobs.into_iter().enumerate() {
            deques[i % num_workers].push(job);
        }

        let mut handles = Vec::with_capacity(num_workers);
        for worker_id in 0..num_workers {
            let deques = deques.clone();
            let processor = Arc::clone(&processor);
            let scope = scope.clone();
            let config = config.clone();
            let results = results.clone();
            let handle = thread::Builder::new()
                .name(format!("jobpool-ws-{worker_id}"))
                .spawn(move || {
                    run_worker(worker_id, &deques, processor.as_ref(), &config, &scope, &results);
                })
                .expect("failed to spawn work-stealing worker thread");
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

fn run_worker<T, R, P>(
    worker_id: usize,
    deques: &[Arc<WorkStealingDeque<Job<T>>>],
    processor: &P,
    config: &Config,
    scope: &RunScope,
    results: &Sender<JobResult<R>>,
) where
    P: Processor<T, R>,
{
    loop {
        if scope.should_stop() {
            return;
        }

        let job = deques[worker_id].pop().or_else(|| steal_from_neighbors(worker_id, deques));

        let Some(job) = job else {
            if deques.iter().all(|d| d.is_empty()) {
                return;
            }
            thread::sleep(Duration::from_millis(1));
            continue;
        };

        let result = exec::execute(worker_id, job, processor, config, scope);
        if results.send(result).is_err() {
            log::warn!("work-stealing: result channel closed, worker {worker_id} stopping early");
            return;
        }
    }
}

fn steal_from_neighbors<T>(worker_id: usize, deques: &[Arc<WorkStealingDeque<Job<T>>>]) -> Option<Job<T>> {
    let n = deques.len();
    for attempt in 1..n {
        let victim = (worker_id + attempt) % n;
        if victim == worker_id {
            continue;
        }
        if let Some(job) = deques[victim].steal() {
            return Some(job);
        }
    }
    None
}
