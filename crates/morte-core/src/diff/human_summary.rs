//! Human-readable summary renderer for manifest diffs.

use crate::diff::model::{DiffReason, ManifestDiff};

/// Render a plain-text summary of a [`ManifestDiff`].
///
/// Informational only; callers decide exit codes from the structured diff.
pub fn render_human_summary(diff: &ManifestDiff) -> String {
    if diff.is_reproducible() {
        return "Reproducible: all outputs match the reference manifest.\n".to_string();
    }

    let mut out = format!(
        "Not reproducible: {} output(s) differ from the reference manifest.\n",
        diff.len()
    );
    for entry in &diff.entries {
        out.push_str(&format!("  {}\n", entry.path));
        for reason in &entry.reasons {
            let line = match reason {
                DiffReason::MissingFromReference => "not in reference manifest".to_string(),
                DiffReason::MissingKind { kind } => {
                    format!("reference has no {} digest", kind)
                }
                DiffReason::DigestMismatch {
                    kind,
                    reference,
                    current,
                } => format!(
                    "{} mismatch: reference {} current {}",
                    kind,
                    short(reference),
                    short(current)
                ),
            };
            out.push_str(&format!("    - {}\n", line));
        }
    }
    out
}

fn short(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}
