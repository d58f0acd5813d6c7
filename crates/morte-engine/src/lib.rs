//! Morte Engine - Reference reconciliation and baselines
//!
//! Provides:
//! - `ReconciliationEngine`: bootstrap, repair and compare a reference baseline
//! - `CheckConfig` / `ModelRegistry`: per-model configuration by lookup
//! - `PerformanceBaseline`: scheduler metrics against a tolerance
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

pub mod config;
pub mod performance;
pub mod reconcile;
pub mod registry;

pub use config::CheckConfig;
pub use performance::{MetricDeviation, PerformanceBaseline};
pub use reconcile::{BaselineState, ReconciliationEngine, SetupReport};
pub use registry::{ModelProfile, ModelRegistry};
