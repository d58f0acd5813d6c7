//! Injectable diagnostic sinks
//!
//! Components that emit caller-visible diagnostics (missing references,
//! missing manifests, absent metric labels) take an `Arc<dyn DiagnosticSink>`
//! instead of writing to a process-wide logger. Production code uses
//! [`TracingSink`]; tests use [`MemorySink`] to assert on the exact text.

use std::sync::{Arc, Mutex};

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DiagnosticLevel::Info => "INFO",
            DiagnosticLevel::Warn => "WARNING",
            DiagnosticLevel::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// A single recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub component: String,
    pub message: String,
}

/// Destination for caller-visible diagnostics
pub trait DiagnosticSink: Send + Sync {
    /// Record a diagnostic at the given level
    fn emit(&self, level: DiagnosticLevel, component: &str, message: &str);

    fn info(&self, component: &str, message: &str) {
        self.emit(DiagnosticLevel::Info, component, message);
    }

    fn warn(&self, component: &str, message: &str) {
        self.emit(DiagnosticLevel::Warn, component, message);
    }

    fn error(&self, component: &str, message: &str) {
        self.emit(DiagnosticLevel::Error, component, message);
    }
}

/// Forwards diagnostics to `tracing` (the default sink)
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, level: DiagnosticLevel, component: &str, message: &str) {
        match level {
            DiagnosticLevel::Info => tracing::info!(
                component,
                event = crate::schema::EVENT_DIAGNOSTIC,
                "{}",
                message
            ),
            DiagnosticLevel::Warn => tracing::warn!(
                component,
                event = crate::schema::EVENT_DIAGNOSTIC,
                "{}",
                message
            ),
            DiagnosticLevel::Error => tracing::error!(
                component,
                event = crate::schema::EVENT_DIAGNOSTIC,
                "{}",
                message
            ),
        }
    }
}

/// Discards every diagnostic
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _level: DiagnosticLevel, _component: &str, _message: &str) {}
}

/// Records diagnostics in memory for test assertions
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<Diagnostic>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All diagnostics recorded so far, in emission order
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Whether any diagnostic at `level` contains `text`
    pub fn contains(&self, level: DiagnosticLevel, text: &str) -> bool {
        self.records()
            .iter()
            .any(|d| d.level == level && d.message.contains(text))
    }

    /// All messages rendered as `LEVEL - component - message` lines
    pub fn text(&self) -> String {
        self.records()
            .iter()
            .map(|d| format!("{} - {} - {}\n", d.level, d.component, d.message))
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().map(|mut r| r.clear()).ok();
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, level: DiagnosticLevel, component: &str, message: &str) {
        self.records
            .lock()
            .map(|mut r| {
                r.push(Diagnostic {
                    level,
                    component: component.to_string(),
                    message: message.to_string(),
                })
            })
            .ok();
    }
}

/// The default sink used when a caller does not inject one
pub fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(TracingSink)
}
