//! Core application primitives: per-symbol pipeline and the polling scheduler.

pub mod alerts;
pub mod counters;
pub mod pipeline;
pub mod scheduler;

pub use counters::RunCounters;
pub use pipeline::{PipelineError, SymbolOutcome, SymbolPipeline};
pub use scheduler::{Scheduler, SchedulerError, SchedulerState, WatchEntry};
