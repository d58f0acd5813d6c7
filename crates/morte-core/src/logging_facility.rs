//! Structured logging facility for morte
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use morte_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Caller-visible warnings (missing references, missing manifest, ...) go
//! through an injected [`crate::diagnostics::DiagnosticSink`] rather than
//! straight to `tracing`, so tests can capture them without a global
//! subscriber.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
