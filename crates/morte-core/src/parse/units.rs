//! Unit conversions for scheduler metrics
//!
//! Sizes use binary units: 1 KB = 2^10 bytes, 1 MB = 2^20 bytes, and so on.

use crate::errors::MetricParseError;
use regex::Regex;
use std::sync::OnceLock;

static SIZE_RE: OnceLock<Regex> = OnceLock::new();

fn size_regex() -> &'static Regex {
    SIZE_RE.get_or_init(|| {
        Regex::new(r"^([0-9]*\.?[0-9]+)([A-Za-z]+)$").expect("size pattern is a valid regex")
    })
}

/// Multiplier for a binary byte unit
pub fn unit_multiplier(unit: &str) -> Result<u64, MetricParseError> {
    let exponent = match unit {
        "B" => 0,
        "KB" => 10,
        "MB" => 20,
        "GB" => 30,
        "TB" => 40,
        "PB" => 50,
        other => {
            return Err(MetricParseError::UnknownUnit {
                unit: other.to_string(),
            })
        }
    };
    Ok(1u64 << exponent)
}

/// Parse a size such as `1.5TB` or `0.00MB` into bytes, rounded to nearest
pub fn parse_bytes(value: &str) -> Result<u64, MetricParseError> {
    let caps = size_regex()
        .captures(value.trim())
        .ok_or_else(|| MetricParseError::InvalidSize {
            value: value.to_string(),
        })?;
    let number: f64 = caps[1]
        .parse()
        .map_err(|_| MetricParseError::InvalidSize {
            value: value.to_string(),
        })?;
    let multiplier = unit_multiplier(&caps[2])?;
    Ok((number * multiplier as f64).round() as u64)
}

/// Parse an `h:m:s` duration into hours
pub fn parse_hours(value: &str) -> Result<f64, MetricParseError> {
    let invalid = || MetricParseError::InvalidDuration {
        value: value.to_string(),
    };
    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    let mut fields = [0f64; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = part.parse::<f64>().map_err(|_| invalid())?;
    }
    Ok(fields[0] + fields[1] / 60.0 + fields[2] / 3600.0)
}

/// Parse a decimal number
pub fn parse_float(value: &str) -> Result<f64, MetricParseError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| MetricParseError::InvalidNumber {
            value: value.to_string(),
        })
}

/// Parse a whole number
pub fn parse_int(value: &str) -> Result<i64, MetricParseError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| MetricParseError::InvalidNumber {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes_binary_units() {
        assert_eq!(parse_bytes("1.5TB").unwrap(), 1_649_267_441_664);
        assert_eq!(parse_bytes("200GB").unwrap(), 214_748_364_800);
        assert_eq!(parse_bytes("1.00KB").unwrap(), 1024);
        assert_eq!(parse_bytes("0.00MB").unwrap(), 0);
        assert_eq!(parse_bytes("17B").unwrap(), 17);
    }

    #[test]
    fn test_parse_bytes_rejects_unknown_unit() {
        assert_eq!(
            parse_bytes("3EB").unwrap_err(),
            MetricParseError::UnknownUnit {
                unit: "EB".to_string()
            }
        );
        assert!(matches!(
            parse_bytes("lots").unwrap_err(),
            MetricParseError::InvalidSize { .. }
        ));
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("20:30:00").unwrap(), 20.5);
        assert_eq!(parse_hours("01:00:00").unwrap(), 1.0);
        assert!((parse_hours("00:30:36").unwrap() - 0.51).abs() < 1e-12);
        assert!(parse_hours("30:00").is_err());
        assert!(parse_hours("aa:bb:cc").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_float("123.45").unwrap(), 123.45);
        assert_eq!(parse_int("234").unwrap(), 234);
        assert!(parse_int("2.5").is_err());
    }
}
