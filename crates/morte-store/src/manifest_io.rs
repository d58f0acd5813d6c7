//! Manifest persistence
//!
//! `load_manifest` and `dump_manifest` bind the in-memory manifest and its
//! YAML codec to a file on disk. Dumps go through [`atomic_write`], so a
//! crash leaves either the previous manifest or the new one.

use crate::atomic::atomic_write;
use crate::errors::{io_error, manifest_missing, Result};
use morte_core::errors::ExErrorKind;
use morte_core::manifest::{decode_manifest, encode_manifest};
use morte_core::Manifest;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Load a manifest from `path`
///
/// # Errors
///
/// - `ManifestMissing` if the file does not exist
/// - `ManifestCorrupt` if it cannot be parsed (the path is attached)
/// - `Io` for any other read failure
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(manifest_missing(path)),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(morte_core::errors::manifest_corrupt(
                Some(path),
                "manifest is not valid UTF-8",
            ))
        }
        Err(e) => return Err(io_error("manifest_load", path, e)),
    };

    decode_manifest(&text).map_err(|e| {
        if e.kind() == ExErrorKind::ManifestCorrupt {
            e.with_path(path)
        } else {
            e
        }
    })
}

/// Write `manifest` to `path`, replacing any previous file atomically
///
/// # Errors
///
/// `Serialization` if encoding fails, `Io` if the file cannot be written.
pub fn dump_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    let text = encode_manifest(manifest)?;
    atomic_write(path, text.as_bytes())?;
    tracing::debug!(
        path = %path.display(),
        entries = manifest.len(),
        "manifest written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morte_core::Digests;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_manifest_missing() {
        let dir = TempDir::new().unwrap();
        let err = load_manifest(&dir.path().join("manifest.yaml")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ManifestMissing);
    }

    #[test]
    fn test_corrupt_file_error_carries_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.yaml");
        fs::write(&path, "- not\n- a mapping\n").unwrap();

        let err = load_manifest(&path).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::ManifestCorrupt);
        assert!(err.path().unwrap().ends_with("manifest.yaml"));
    }

    #[test]
    fn test_dump_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("manifest.yaml");
        let mut manifest = Manifest::new();
        let mut digests = Digests::new();
        digests.insert("sha256".to_string(), "ab".repeat(32));
        manifest.insert("foo/file1", digests).unwrap();

        dump_manifest(&path, &manifest).unwrap();

        assert_eq!(load_manifest(&path).unwrap(), manifest);
    }
}
