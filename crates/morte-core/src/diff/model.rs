//! Manifest diff output types.

use serde::{Deserialize, Serialize};

/// Why a path was flagged as differing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DiffReason {
    /// The path has no entry in the reference manifest at all
    MissingFromReference,
    /// The reference entry does not record this hash kind
    MissingKind { kind: String },
    /// Both sides record the kind but the digests disagree
    DigestMismatch {
        kind: String,
        reference: String,
        current: String,
    },
}

/// One differing path with every reason it differs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffEntry {
    pub path: String,
    pub reasons: Vec<DiffReason>,
}

/// Structured result of comparing current against reference
///
/// Each path appears at most once. An empty diff means the run reproduced
/// its reference outputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestDiff {
    pub entries: Vec<DiffEntry>,
}

impl ManifestDiff {
    /// Differing paths in report order
    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    pub fn entry(&self, path: &str) -> Option<&DiffEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn is_reproducible(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_serializes_with_tag() {
        let reason = DiffReason::MissingKind {
            kind: "blake3".to_string(),
        };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["reason"], "missing_kind");
        assert_eq!(json["kind"], "blake3");
    }
}
