//! # jobpool
//!
//! A generic, embeddable worker pool: a bounded set of parallel workers
//! consuming a pre-loaded batch of typed jobs through one of several
//! pluggable distribution strategies, returning one typed result per job.
//!
//! ## Module structure
//!
//! - `job`: `Job<T>` / `JobResult<R>` data model
//! - `config`: `Config` / `Strategy` with clamped, validated construction
//! - `processor`: the `Processor<T, R>` trait jobs are run through
//! - `scope`: `RunScope`, the shared cancellation signal
//! - `deque`: `WorkStealingDeque<T>`, a Chase-Lev-style work-stealing queue
//! - `heap`: `PriorityHeap<T>`, a fair (priority desc, created asc) heap
//! - `exec`: the per-job retry/timeout execution primitive
//! - `strategies`: round-robin, chunked, work-stealing, priority dispatch
//! - `pool`: `Pool<T, R, P>`, the run orchestrator
//! - `metrics`: atomic run counters and their by-value snapshot

pub mod config;
pub mod deque;
pub mod error;
mod exec;
pub mod heap;
pub mod job;
pub mod metrics;
pub mod pool;
pub mod processor;
pub mod scope;
pub mod strategies;

pub use config::{Config, Strategy};
pub use error::PoolError;
pub use job::{Job, JobResult};
pub use metrics::MetricsSnapshot;
pub use pool::Pool;
pub use processor::Processor;
pub use scope::RunScope;
