use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::job::{Job, JobResult};
use crate::processor::Processor;
use crate::scope::RunScope;

/// Placeholder error for a job whose retry loop never ran a single
/// attempt because the run scope was already cancelled. A job that was
/// popped for execution still owes exactly one [`JobResult`] per the
/// "no spurious results, no silent drops" invariant, even when it never
/// reaches the processor.
#[derive(Debug, thiserror::Error)]
#[error("job execution was cancelled before any attempt ran")]
struct JobCancelled;

/// A processor invocation unwound instead of returning. Caught so the
/// panic can't take the whole worker thread down with the rest of its
/// inbox/chunk/deque still unserved; the attempt is treated like any
/// other failure and is subject to the same retry/backoff budget.
#[derive(Debug, thiserror::Error)]
#[error("processor panicked: {0}")]
struct ProcessorPanicked(String);

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs one job to completion: up to `config.max_retries() + 1` attempts,
/// linear backoff between attempts, an optional per-attempt deadline
/// derived from `scope`. Always returns a [`JobResult`]; never panics on
/// processor failure — a processor invocation that itself panics is
/// caught and folded into the same retry/backoff path as an ordinary
/// error, so the panic never escapes onto the worker thread.
///
/// The processor is an opaque, potentially blocking call: a per-attempt
/// deadline bounds how long the *caller* is willing to wait by attaching a
/// tightened [`RunScope`], but it cannot preempt a processor that ignores
/// cancellation and never returns. That's an accepted constraint of
/// treating the processor as an opaque capability rather than a
/// preemptible task.
pub fn execute<T, R, P>(worker_id: usize, job: Job<T>, processor: &P, config: &Config, scope: &RunScope) -> JobResult<R>
where
    P: Processor<T, R>,
{
    let started = Instant::now();
    let total_attempts = config.total_attempts();
    let mut last_error = None;
    let mut data = None;

    for attempt in 0..total_attempts {
        if scope.should_stop() {
            break;
        }

        let attempt_scope = scope.child_with_timeout(config.worker_timeout());
        let attempt_result = panic::catch_unwind(AssertUnwindSafe(|| processor.process(&attempt_scope, &job)));

        let outcome = match attempt_result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(Box::new(err) as Box<dyn std::error::Error + Send + Sync>),
            Err(payload) => {
                let message = panic_message(payload);
                log::error!("jobpool: processor panicked on job {}: {message}", job.id);
                Err(Box::new(ProcessorPanicked(message)) as Box<dyn std::error::Error + Send + Sync>)
            }
        };

        match outcome {
            Ok(value) => {
                data = Some(value);
                last_error = None;
                break;
            }
            Err(err) => {
                last_error = Some(err);
                let is_last_attempt = attempt + 1 == total_attempts;
                if is_last_attempt || scope.should_stop() {
                    break;
                }
                thread::sleep(Duration::from_millis(100 * (attempt as u64 + 1)));
            }
        }
    }

    if data.is_none() && last_error.is_none() {
        last_error = Some(Box::new(JobCancelled) as Box<dyn std::error::Error + Send + Sync>);
    }

    let completed = Instant::now();
    JobResult {
        job_id: job.id,
        data,
        error: last_error,
        worker: worker_id,
        started,
        completed,
        duration: completed - started,
    }
}
