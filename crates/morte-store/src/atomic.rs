//! Atomic write primitives
//!
//! Uses temp→rename pattern to ensure no partial writes

use crate::errors::{io_error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling temp path: the target's file name with `.tmp` appended
fn temp_path(target_path: &Path) -> PathBuf {
    let mut name = target_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    target_path.with_file_name(name)
}

fn ensure_parent(target_path: &Path, op: &str) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(op, parent, e))?;
    }
    Ok(())
}

/// Atomically write bytes to a file
///
/// Uses temp file + rename to ensure atomic write
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent(target_path, "create_parent_dir")?;

    // Create temp file in the same directory
    let temp = temp_path(target_path);

    fs::write(&temp, content).map_err(|e| io_error("write_temp", &temp, e))?;

    fs::rename(&temp, target_path).map_err(|e| {
        let _ = fs::remove_file(&temp);
        io_error("rename_temp", target_path, e)
    })?;

    Ok(())
}

/// Atomically copy `source` over `target_path`
///
/// An existing target is replaced; a reader never sees a half-copied file.
pub fn atomic_copy(source: &Path, target_path: &Path) -> Result<()> {
    ensure_parent(target_path, "create_parent_dir")?;

    let temp = temp_path(target_path);

    fs::copy(source, &temp).map_err(|e| {
        let _ = fs::remove_file(&temp);
        io_error("copy_temp", source, e)
    })?;

    fs::rename(&temp, target_path).map_err(|e| {
        let _ = fs::remove_file(&temp);
        io_error("rename_temp", target_path, e)
    })?;

    Ok(())
}
