//! PBS resource-usage summary
//!
//! PBS appends a block like this to a job's output file:
//!
//! ```text
//!    Service Units:      123.45
//!    NCPUs Requested:    234                    NCPUs Used: 123
//!                                            CPU Time Used: 20:30:00
//!    Memory Requested:   1.5TB                 Memory Used: 200GB
//!    Walltime requested: 01:00:00            Walltime Used: 00:30:36
//!    JobFS requested:    1.00KB                 JobFS used: 0.00MB
//! ```

use crate::diagnostics::DiagnosticSink;
use crate::errors::{ExError, ExErrorKind, Result};
use crate::parse::metrics::{MetricValue, PerformanceMetrics};
use crate::parse::summary::search_lines;
use crate::parse::units::{parse_bytes, parse_float, parse_hours, parse_int};
use regex::Regex;

const COMPONENT: &str = "morte::parse::pbs";

/// How a raw label value is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Float,
    Int,
    /// `h:m:s` to hours
    Hours,
    /// binary-unit size to bytes
    Bytes,
}

/// Labels read from a PBS summary and their conversions
pub const PBS_LABELS: &[(&str, Conversion)] = &[
    ("Service Units", Conversion::Float),
    ("NCPUs Requested", Conversion::Int),
    ("NCPUs Used", Conversion::Int),
    ("CPU Time Used", Conversion::Hours),
    ("Memory Requested", Conversion::Bytes),
    ("Memory Used", Conversion::Bytes),
    ("Walltime requested", Conversion::Hours),
    ("Walltime Used", Conversion::Hours),
    ("JobFS requested", Conversion::Bytes),
    ("JobFS used", Conversion::Bytes),
];

/// Parse the PBS summary labels out of `text`
///
/// A label that does not appear is reported through `sink` and left out of
/// the result.
///
/// # Errors
///
/// - `MetricAmbiguous` if a label appears on more than one line
/// - `InvalidMetric` if a value cannot be converted
pub fn parse_pbs_summary(text: &str, sink: &dyn DiagnosticSink) -> Result<PerformanceMetrics> {
    let mut metrics = PerformanceMetrics::new();

    for &(label, conversion) in PBS_LABELS {
        let pattern = Regex::new(&format!(r"\s*{}:\s*([^ ]+)", regex::escape(label))).map_err(
            |e| {
                ExError::new(ExErrorKind::Internal)
                    .with_op("parse_pbs_summary")
                    .with_message(e.to_string())
            },
        )?;
        let groups = search_lines(text, &pattern);

        let raw = match groups.as_slice() {
            [] => {
                sink.warn(COMPONENT, &format!("'{}' not found in PBS output", label));
                continue;
            }
            [only] => only[0].as_str(),
            _ => {
                sink.error(
                    COMPONENT,
                    &format!("Multiple values found for '{}' in PBS output", label),
                );
                return Err(ExError::new(ExErrorKind::MetricAmbiguous)
                    .with_op("parse_pbs_summary")
                    .with_message(format!("'{}' found {} times", label, groups.len()))
                    .with_candidates(groups.iter().map(|g| g[0].clone()).collect()));
            }
        };

        let value = convert(raw, conversion).map_err(|e| {
            let message = format!("label '{}': {}", label, e.message());
            e.with_message(message)
        })?;
        metrics.insert(label, value);
    }

    Ok(metrics)
}

fn convert(raw: &str, conversion: Conversion) -> Result<MetricValue> {
    Ok(match conversion {
        Conversion::Float => MetricValue::Float(parse_float(raw)?),
        Conversion::Int => MetricValue::Int(parse_int(raw)?),
        Conversion::Hours => MetricValue::Float(parse_hours(raw)?),
        Conversion::Bytes => {
            let bytes = parse_bytes(raw)?;
            MetricValue::Int(i64::try_from(bytes).map_err(|_| {
                ExError::new(ExErrorKind::InvalidMetric)
                    .with_op("parse_metric")
                    .with_message(format!("'{}' overflows a byte count", raw))
            })?)
        }
    })
}
