use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use jobpool::{Config, Job, Pool, RunScope, Strategy};

#[derive(Debug, thiserror::Error)]
#[error("never fails")]
struct Never;

fn sleep_a_bit(_: &RunScope, job: &Job<u32>) -> Result<u32, Never> {
    let micros = match job.data % 3 {
        0 => 100,
        1 => 1_000,
        _ => 10_000,
    };
    thread::sleep(Duration::from_micros(micros));
    Ok(job.data)
}

#[test]
fn every_job_is_delivered_exactly_once_under_work_stealing() {
    const TOTAL: u32 = 2_000;
    let config = Config::new()
        .with_num_workers(8)
        .with_strategy(Strategy::WorkStealing)
        .with_buffer_size(TOTAL as usize);
    let mut pool: Pool<u32, u32, _> = Pool::new_with(config).with_processor(sleep_a_bit);

    let jobs = (0..TOTAL).map(|i| Job::new(i.to_string(), i));
    pool.add_jobs(jobs);

    let results = pool.run().expect("run should succeed");
    assert_eq!(results.len(), TOTAL as usize);

    let mut seen_ids = HashSet::new();
    for result in &results {
        assert!(result.is_success());
        assert!(seen_ids.insert(result.job_id.clone()), "duplicate result for job {}", result.job_id);
    }

    let expected_ids: HashSet<String> = (0..TOTAL).map(|i| i.to_string()).collect();
    assert_eq!(seen_ids, expected_ids);
}
