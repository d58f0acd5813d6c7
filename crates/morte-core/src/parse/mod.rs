//! Scheduler job-summary parsing
//!
//! Turns the free-text resource report a batch scheduler appends to a job's
//! output file into named numeric metrics.
//!
//! - [`summary::SummaryParser`] reads a file and runs per-line regex searches
//! - [`units`] converts durations and binary-unit sizes
//! - [`pbs::parse_pbs_summary`] applies the PBS label vocabulary
//! - [`metrics::PerformanceMetrics`] holds the result

pub mod metrics;
pub mod pbs;
pub mod summary;
pub mod units;

pub use metrics::{MetricValue, PerformanceMetrics};
pub use pbs::{parse_pbs_summary, PBS_LABELS};
pub use summary::SummaryParser;
