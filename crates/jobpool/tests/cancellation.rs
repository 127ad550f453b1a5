use std::thread;
use std::time::{Duration, Instant};

use jobpool::{Config, Job, Pool, PoolError, RunScope, Strategy};

#[derive(Debug, thiserror::Error)]
#[error("unreachable")]
struct Unreachable;

fn slow_echo(scope: &RunScope, job: &Job<String>) -> Result<String, Unreachable> {
    let step = Duration::from_millis(10);
    let mut waited = Duration::ZERO;
    while waited < Duration::from_millis(200) {
        if scope.should_stop() {
            break;
        }
        thread::sleep(step);
        waited += step;
    }
    Ok(job.data.clone())
}

#[test]
fn stop_returns_within_a_bounded_window() {
    let config = Config::new().with_num_workers(4).with_strategy(Strategy::RoundRobin);
    let mut pool: Pool<String, String, _> = Pool::new_with(config).with_processor(slow_echo);
    pool.add_jobs([Job::new("1", "hello".to_string()), Job::new("2", "world".to_string())]);

    let cancel = pool.cancel_handle();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        cancel.set_stop();
    });

    let start = Instant::now();
    let result = pool.run();
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(PoolError::Cancelled { .. })));
    assert!(elapsed < Duration::from_millis(500), "run took too long to observe cancellation: {elapsed:?}");
}
