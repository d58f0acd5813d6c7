//! Manifest comparison engine.

use crate::diff::model::{DiffEntry, DiffReason, ManifestDiff};
use crate::manifest::Manifest;

/// Compare `current` against `reference`.
///
/// For every path in `current` (in its order), and every hash kind recorded
/// for that path, the path differs when the reference has no entry, lacks
/// that kind, or records a different digest. Paths only in `reference` are
/// ignored.
pub fn compare(current: &Manifest, reference: &Manifest) -> ManifestDiff {
    let mut entries = Vec::new();

    for (path, digests) in current.iter() {
        let reasons = match reference.get(path) {
            None => vec![DiffReason::MissingFromReference],
            Some(recorded) => digests
                .iter()
                .filter_map(|(kind, value)| match recorded.get(kind) {
                    None => Some(DiffReason::MissingKind { kind: kind.clone() }),
                    Some(expected) if expected != value => Some(DiffReason::DigestMismatch {
                        kind: kind.clone(),
                        reference: expected.clone(),
                        current: value.clone(),
                    }),
                    Some(_) => None,
                })
                .collect(),
        };

        if !reasons.is_empty() {
            entries.push(DiffEntry {
                path: path.to_string(),
                reasons,
            });
        }
    }

    ManifestDiff { entries }
}
