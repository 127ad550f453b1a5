use std::time::{Duration, Instant};

use crate::error::BoxedProcessorError;

/// A unit of work submitted to a [`crate::Pool`].
///
/// `created` is stamped by [`crate::Pool::add_job`]/[`crate::Pool::add_jobs`]
/// if left at its default, so callers never have to touch it themselves.
#[derive(Debug, Clone)]
pub struct Job<T> {
    pub id: String,
    pub data: T,
    pub priority: i64,
    pub created: Option<Instant>,
}

impl<T> Job<T> {
    pub fn new(id: impl Into<String>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
            priority: 0,
            created: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub(crate) fn stamp_created(&mut self) {
        if self.created.is_none() {
            self.created = Some(Instant::now());
        }
    }

    pub(crate) fn created_at(&self) -> Instant {
        self.created.expect("job created timestamp must be stamped before dispatch")
    }
}

/// One outcome per job that entered execution. See invariants on
/// `total_jobs` in [`crate::metrics::Metrics`] for what "entered execution"
/// means for jobs still queued when the run is cancelled.
#[derive(Debug)]
pub struct JobResult<R> {
    pub job_id: String,
    pub data: Option<R>,
    pub error: Option<BoxedProcessorError>,
    pub worker: usize,
    pub started: Instant,
    pub completed: Instant,
    pub duration: Duration,
}

impl<R> JobResult<R> {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
