//! Performance metric values

use crate::errors::{ExError, ExErrorKind, Result};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// A single numeric metric
///
/// Counts and byte sizes are integers; durations (hours) and service
/// units are floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

impl MetricValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            MetricValue::Int(v) => v as f64,
            MetricValue::Float(v) => v,
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Int(v) => write!(f, "{}", v),
            MetricValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Named metrics parsed from one job summary, keyed by label in parse order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceMetrics {
    values: IndexMap<String, MetricValue>,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: MetricValue) {
        self.values.insert(label.into(), value);
    }

    pub fn get(&self, label: &str) -> Option<MetricValue> {
        self.values.get(label).copied()
    }

    /// Value of `label`, which must be present
    ///
    /// # Errors
    ///
    /// `MetricMissing` if the label was not parsed.
    pub fn require(&self, label: &str) -> Result<MetricValue> {
        self.get(label).ok_or_else(|| {
            ExError::new(ExErrorKind::MetricMissing)
                .with_op("require_metric")
                .with_message(format!("'{}' not found in PBS output", label))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, MetricValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
