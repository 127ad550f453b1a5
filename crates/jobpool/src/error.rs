/// Errors surfaced directly from [`crate::Pool::run`].
///
/// Per-job processor failures are not represented here; they travel in
/// [`crate::JobResult::error`] as a boxed `std::error::Error` so the pool
/// stays agnostic to the processor's own error type.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("run() called before with_processor()")]
    NoProcessor,

    #[error("run() called with an empty job batch")]
    NoJobs,

    #[error("run cancelled after {processed} of {total} jobs completed")]
    Cancelled { processed: usize, total: usize },
}

/// Boxed processor error, carried in [`crate::JobResult::error`].
pub type BoxedProcessorError = Box<dyn std::error::Error + Send + Sync + 'static>;
