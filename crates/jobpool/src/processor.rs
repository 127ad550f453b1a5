use crate::job::Job;
use crate::scope::RunScope;

/// The caller-supplied capability a [`crate::Pool`] drives per job. The
/// pool never inspects `T`/`R`/`Error`; it only needs `process` to return
/// something it can package into a [`crate::JobResult`].
///
/// Implemented for any `Fn(&RunScope, &Job<T>) -> Result<R, E>` closure so
/// most callers never need to name a type for this.
pub trait Processor<T, R>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn process(&self, scope: &RunScope, job: &Job<T>) -> Result<R, Self::Error>;
}

impl<T, R, E, F> Processor<T, R> for F
where
    F: Fn(&RunScope, &Job<T>) -> Result<R, E> + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn process(&self, scope: &RunScope, job: &Job<T>) -> Result<R, Self::Error> {
        self(scope, job)
    }
}
