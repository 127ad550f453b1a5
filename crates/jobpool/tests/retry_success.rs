use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use jobpool::{Config, Job, Pool, RunScope, Strategy};

#[derive(Debug, thiserror::Error)]
#[error("not yet")]
struct NotYet;

#[test]
fn job_succeeds_after_two_failures_within_retry_budget() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_for_processor = Arc::clone(&calls);

    let processor = move |_: &RunScope, job: &Job<String>| -> Result<String, NotYet> {
        let n = calls_for_processor.fetch_add(1, Ordering::SeqCst);
        if n < 2 {
            Err(NotYet)
        } else {
            Ok(job.data.to_uppercase())
        }
    };

    let config = Config::new().with_num_workers(1).with_strategy(Strategy::RoundRobin).with_max_retries(2);
    let mut pool: Pool<String, String, _> = Pool::new_with(config).with_processor(processor);
    pool.add_job(Job::new("1", "hello".to_string()));

    let results = pool.run().expect("run should succeed");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].data.as_deref(), Some("HELLO"));
    assert!(results[0].is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn job_exhausts_retry_budget_and_reports_failure() {
    let config = Config::new().with_num_workers(1).with_max_retries(1);
    let mut pool: Pool<String, String, _> =
        Pool::new_with(config).with_processor(|_: &RunScope, _: &Job<String>| -> Result<String, NotYet> { Err(NotYet) });
    pool.add_job(Job::new("1", "hello".to_string()));

    let results = pool.run().expect("run should succeed even though the job fails");
    assert_eq!(results.len(), 1);
    assert!(!results[0].is_success());
}
