//! YAML text format for manifests
//!
//! One top-level key per relative path, each mapping hash-kind name to
//! digest, written in insertion order:
//!
//! ```yaml
//! foo/file1:
//!   sha256: 9f86d081...
//! bar/file2:
//!   sha256: 60303ae2...
//! ```
//!
//! An empty manifest is written as `{}`.

use crate::checksum::Digests;
use crate::errors::{manifest_corrupt, ExError, Result};
use crate::manifest::Manifest;
use serde_yaml::{Mapping, Value};

/// Serialize a manifest to YAML text
///
/// # Errors
///
/// `Serialization` if YAML emission fails.
pub fn encode_manifest(manifest: &Manifest) -> Result<String> {
    let mut root = Mapping::new();
    for (path, entry) in manifest.iter() {
        let mut digests = Mapping::new();
        for (kind, value) in entry {
            digests.insert(Value::String(kind.clone()), Value::String(value.clone()));
        }
        root.insert(Value::String(path.to_string()), Value::Mapping(digests));
    }
    serde_yaml::to_string(&root).map_err(|e| ExError::from(e).with_op("manifest_encode"))
}

/// Parse YAML text into a manifest
///
/// # Errors
///
/// `ManifestCorrupt` when the text is not YAML, the top level is not a
/// mapping, a key is not a string, or an entry is not a non-empty mapping
/// of string to string.
pub fn decode_manifest(text: &str) -> Result<Manifest> {
    let root: Value = serde_yaml::from_str(text)
        .map_err(|e| manifest_corrupt(None, format!("YAML parse error: {}", e)))?;

    let root = match root {
        Value::Mapping(m) => m,
        other => {
            return Err(manifest_corrupt(
                None,
                format!("top level must be a mapping, got {}", value_kind(&other)),
            ))
        }
    };

    let mut manifest = Manifest::new();
    for (key, value) in root {
        let path = match key {
            Value::String(s) => s,
            other => {
                return Err(manifest_corrupt(
                    None,
                    format!("path keys must be strings, got {}", value_kind(&other)),
                ))
            }
        };
        let digests = decode_digests(&path, value)?;
        manifest.insert(path, digests)?;
    }
    Ok(manifest)
}

fn decode_digests(path: &str, value: Value) -> Result<Digests> {
    let mapping = match value {
        Value::Mapping(m) => m,
        other => {
            return Err(manifest_corrupt(
                None,
                format!(
                    "entry '{}' must map hash kinds to digests, got {}",
                    path,
                    value_kind(&other)
                ),
            ))
        }
    };

    let mut digests = Digests::new();
    for (kind, digest) in mapping {
        match (kind, digest) {
            (Value::String(kind), Value::String(digest)) => {
                digests.insert(kind, digest);
            }
            _ => {
                return Err(manifest_corrupt(
                    None,
                    format!("entry '{}' has a non-string hash kind or digest", path),
                ))
            }
        }
    }

    if digests.is_empty() {
        return Err(manifest_corrupt(
            None,
            format!("entry '{}' has no digests", path),
        ));
    }
    Ok(digests)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
