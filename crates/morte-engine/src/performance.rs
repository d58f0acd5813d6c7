//! Performance baseline
//!
//! Scheduler metrics follow the same lifecycle as output files: the first
//! run bootstraps a reference file, later runs load it and compare. Metrics
//! are compared against a relative tolerance rather than for equality.

use morte_core::diagnostics::default_sink;
use morte_core::errors::{io_error, ExError, ExErrorKind, Result};
use morte_core::{
    log_op_end, log_op_error, log_op_start, DiagnosticSink, MetricValue, PerformanceMetrics,
    SummaryParser,
};
use morte_store::atomic::atomic_write;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

const COMPONENT: &str = "morte::engine::performance";

const MISSING_REFERENCE: &str =
    "Performance reference file does not exist. Generating one from current output";

/// A metric that moved further than the tolerance allows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDeviation {
    pub label: String,
    pub reference: MetricValue,
    pub current: MetricValue,
    /// `(current - reference) / |reference|`; infinite for a zero reference
    pub relative_change: f64,
}

/// Current metrics paired with a persisted reference
pub struct PerformanceBaseline {
    reference_path: PathBuf,
    current: PerformanceMetrics,
    reference: PerformanceMetrics,
    sink: Arc<dyn DiagnosticSink>,
}

impl PerformanceBaseline {
    pub fn new(reference_path: impl Into<PathBuf>, current: PerformanceMetrics) -> Self {
        Self {
            reference_path: reference_path.into(),
            current,
            reference: PerformanceMetrics::new(),
            sink: default_sink(),
        }
    }

    /// Parse the scheduler log matching `pattern` below `output_dir`
    ///
    /// # Errors
    ///
    /// `FileUnavailable` or `AmbiguousSource` from locating the log,
    /// `MetricAmbiguous` or `InvalidMetric` from parsing it.
    pub fn from_scheduler_log(
        output_dir: &Path,
        pattern: &str,
        reference_path: impl Into<PathBuf>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self> {
        let parser = SummaryParser::locate(output_dir, pattern)?;
        tracing::debug!(path = %parser.path().display(), "scheduler log located");
        let current = parser.parse_pbs_summary(sink.as_ref())?;
        Ok(Self::new(reference_path, current).with_sink(sink))
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn current(&self) -> &PerformanceMetrics {
        &self.current
    }

    pub fn reference(&self) -> &PerformanceMetrics {
        &self.reference
    }

    pub fn reference_path(&self) -> &Path {
        &self.reference_path
    }

    /// Load the reference metrics, bootstrapping them from the current run
    /// if no reference file exists
    ///
    /// Returns whether the reference file was created.
    ///
    /// # Errors
    ///
    /// `Serialization` if the reference file cannot be parsed, `Io` if it
    /// cannot be read or written.
    pub fn setup(&mut self) -> Result<bool> {
        log_op_start!("performance_setup", metric_count = self.current.len());
        let start = Instant::now();

        let created = self.setup_impl().map_err(|e| {
            log_op_error!(
                "performance_setup",
                &e,
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "performance_setup",
            duration_ms = start.elapsed().as_millis() as u64,
            created = created
        );
        Ok(created)
    }

    fn setup_impl(&mut self) -> Result<bool> {
        if self.reference_path.is_file() {
            self.reference = load_metrics(&self.reference_path)?;
            Ok(false)
        } else {
            self.sink.warn(COMPONENT, MISSING_REFERENCE);
            self.update_reference()?;
            Ok(true)
        }
    }

    /// Metrics whose relative change exceeds `tolerance`, in label order
    ///
    /// A zero reference deviates exactly when the current value is non-zero.
    /// Metrics present on only one side are ignored.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `tolerance` is negative or not a number.
    pub fn compare(&self, tolerance: f64) -> Result<Vec<MetricDeviation>> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("performance_compare")
                .with_message(format!("tolerance must be non-negative, got {}", tolerance)));
        }

        let mut deviations = Vec::new();
        for (label, current) in self.current.iter() {
            let Some(reference) = self.reference.get(label) else {
                continue;
            };
            let relative_change = relative_change(reference.as_f64(), current.as_f64());
            if relative_change.abs() > tolerance {
                deviations.push(MetricDeviation {
                    label: label.to_string(),
                    reference,
                    current,
                    relative_change,
                });
            }
        }
        Ok(deviations)
    }

    /// Accept the current metrics as the reference and persist them
    ///
    /// # Errors
    ///
    /// `Serialization` or `Io` if the reference file cannot be written.
    pub fn update_reference(&mut self) -> Result<()> {
        self.reference = self.current.clone();
        let text = serde_yaml::to_string(&self.reference).map_err(|e| {
            ExError::from(e)
                .with_op("performance_dump")
                .with_path(&self.reference_path)
        })?;
        atomic_write(&self.reference_path, text.as_bytes())
    }
}

fn relative_change(reference: f64, current: f64) -> f64 {
    if reference == 0.0 {
        if current == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(current)
        }
    } else {
        (current - reference) / reference.abs()
    }
}

fn load_metrics(path: &Path) -> Result<PerformanceMetrics> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error("performance_load", path, e))?;
    serde_yaml::from_str(&text)
        .map_err(|e| ExError::from(e).with_op("performance_load").with_path(path))
}
