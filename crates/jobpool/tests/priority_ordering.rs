use std::sync::{Arc, Mutex};

use jobpool::{Config, Job, Pool, RunScope, Strategy};

#[derive(Debug, thiserror::Error)]
#[error("never fails")]
struct Never;

#[test]
fn jobs_dispatch_in_priority_then_fifo_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let order_for_processor = Arc::clone(&order);

    let processor = move |_: &RunScope, job: &Job<String>| -> Result<String, Never> {
        order_for_processor.lock().unwrap().push(job.data.clone());
        Ok(job.data.clone())
    };

    let config = Config::new().with_num_workers(1).with_strategy(Strategy::Priority);
    let mut pool: Pool<String, String, _> = Pool::new_with(config).with_processor(processor);

    pool.add_job(Job::new("1", "low".to_string()).with_priority(1));
    pool.add_job(Job::new("2", "high".to_string()).with_priority(10));
    pool.add_job(Job::new("3", "medium".to_string()).with_priority(5));

    let results = pool.run().expect("run should succeed");
    assert_eq!(results.len(), 3);

    let observed = order.lock().unwrap().clone();
    assert_eq!(observed, vec!["high", "medium", "low"]);
}

#[test]
fn equal_priority_jobs_dispatch_in_enqueue_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let order_for_processor = Arc::clone(&order);

    let processor = move |_: &RunScope, job: &Job<String>| -> Result<String, Never> {
        order_for_processor.lock().unwrap().push(job.id.clone());
        Ok(job.data.clone())
    };

    let config = Config::new().with_num_workers(1).with_strategy(Strategy::Priority);
    let mut pool: Pool<String, String, _> = Pool::new_with(config).with_processor(processor);

    for i in 0..5 {
        pool.add_job(Job::new(i.to_string(), format!("job-{i}")).with_priority(5));
        std::thread::sleep(std::time::Duration::from_micros(200));
    }

    let _ = pool.run().expect("run should succeed");
    let observed = order.lock().unwrap().clone();
    assert_eq!(observed, vec!["0", "1", "2", "3", "4"]);
}
