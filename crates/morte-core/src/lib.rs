//! morte Core - checksum manifests and reproducibility comparison
//!
//! This crate provides the building blocks of a reproducibility check:
//! - Structured error facility with stable error codes
//! - Logging facility and injectable diagnostic sinks
//! - Streaming checksum computation over named hash kinds
//! - The checksum `Manifest` and its YAML text format
//! - The manifest comparator producing a structured diff
//! - Unique file location by wildcard pattern
//! - Scheduler job-summary parsing into performance metrics
//!
//! Filesystem persistence of manifests and reference trees lives in
//! `morte-store`; orchestration lives in `morte-engine`.

pub mod checksum;
pub mod diagnostics;
pub mod diff;
pub mod errors;
pub mod locate;
pub mod logging_facility;
pub mod manifest;
pub mod parse;

// Re-export commonly used types
pub use checksum::{ChecksumComputer, Digests, HashKind, StreamingChecksum};
pub use diagnostics::{DiagnosticLevel, DiagnosticSink, MemorySink, NoopSink, TracingSink};
pub use diff::{compare, ManifestDiff};
pub use errors::{ExError, ExErrorKind, Result};
pub use locate::resolve_unique;
pub use manifest::{AddOutcome, Manifest};
pub use parse::{MetricValue, PerformanceMetrics, SummaryParser};

// Schema constants used by the logging macros
pub use morte_core_types::schema;
