//! Reference tree and reference manifest
//!
//! A [`ReferenceStore`] owns the directory holding known-good copies of a
//! model's output files, plus the manifest recording their digests. It
//! copies fresh outputs into that tree and keeps the in-memory manifest
//! consistent with what is physically present. Persisting the manifest is
//! always a separate [`ReferenceStore::dump`] call so several updates can be
//! batched before one write.
//!
//! ## Invariants
//!
//! - `reference_dir` mirrors the relative layout of `base_dir` for every
//!   declared output file
//! - Output paths are relative and never climb out of either root
//!
//! ## Non-Responsibilities
//!
//! - Deciding *when* to copy or rehash (handled by the reconciliation engine)
//! - Comparison (handled by `morte_core::diff`)

use crate::atomic::atomic_copy;
use crate::errors::{invalid_output_path, Result};
use crate::manifest_io::{dump_manifest, load_manifest};
use morte_core::diagnostics::default_sink;
use morte_core::errors::{ExError, ExErrorKind};
use morte_core::{AddOutcome, ChecksumComputer, DiagnosticSink, HashKind, Manifest, StreamingChecksum};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

const COMPONENT: &str = "morte::store::reference";

/// Where a store reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    /// Directory holding the latest run's outputs
    pub base_dir: PathBuf,
    /// Directory holding the known-good copies
    pub reference_dir: PathBuf,
    /// Persisted reference manifest
    pub manifest_path: PathBuf,
    /// Reproducibility-relevant paths, relative to both roots
    pub output_files: Vec<String>,
    /// Digest kinds recorded for every file
    pub hash_kinds: Vec<HashKind>,
}

/// The reference directory tree and its manifest
pub struct ReferenceStore {
    layout: StoreLayout,
    computer: Arc<dyn ChecksumComputer>,
    sink: Arc<dyn DiagnosticSink>,
    manifest: Manifest,
}

impl std::fmt::Debug for ReferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceStore")
            .field("layout", &self.layout)
            .field("manifest_entries", &self.manifest.len())
            .finish()
    }
}

impl ReferenceStore {
    /// Create a store with the built-in checksum computer and the tracing sink
    ///
    /// The manifest starts empty; call [`load_manifest`](Self::load_manifest)
    /// to read the persisted one.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if an output path is absolute or contains `..`, or if
    /// no hash kind is given.
    pub fn new(layout: StoreLayout) -> Result<Self> {
        for path in &layout.output_files {
            if !is_contained(path) {
                return Err(invalid_output_path(path));
            }
        }
        if layout.hash_kinds.is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("store_open")
                .with_message("at least one hash kind is required"));
        }
        Ok(Self {
            layout,
            computer: Arc::new(StreamingChecksum),
            sink: default_sink(),
            manifest: Manifest::new(),
        })
    }

    pub fn with_computer(mut self, computer: Arc<dyn ChecksumComputer>) -> Self {
        self.computer = computer;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }

    pub fn output_files(&self) -> &[String] {
        &self.layout.output_files
    }

    pub fn reference_path(&self, path: &str) -> PathBuf {
        self.layout.reference_dir.join(path)
    }

    pub fn output_path(&self, path: &str) -> PathBuf {
        self.layout.base_dir.join(path)
    }

    /// Whether a persisted manifest exists
    pub fn manifest_exists(&self) -> bool {
        self.layout.manifest_path.is_file()
    }

    /// Replace the in-memory manifest with the persisted one
    ///
    /// # Errors
    ///
    /// `ManifestMissing`, `ManifestCorrupt` or `Io` from [`load_manifest`].
    pub fn load_manifest(&mut self) -> Result<()> {
        self.manifest = load_manifest(&self.layout.manifest_path)?;
        tracing::debug!(
            path = %self.layout.manifest_path.display(),
            entries = self.manifest.len(),
            "reference manifest loaded"
        );
        Ok(())
    }

    pub fn reference_manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Declared output files with no copy in the reference tree, in order
    pub fn missing_references(&self) -> Vec<String> {
        self.layout
            .output_files
            .iter()
            .filter(|f| !self.reference_path(f).exists())
            .cloned()
            .collect()
    }

    /// Copy `path` from the output tree into the reference tree
    ///
    /// Returns `false`, after a warning, when the output file itself does not
    /// exist. Any existing reference copy is replaced.
    ///
    /// # Errors
    ///
    /// `Io` if the copy fails for any other reason.
    pub fn copy_to_reference(&self, path: &str) -> Result<bool> {
        let source = self.output_path(path);
        if !source.is_file() {
            self.sink
                .warn(COMPONENT, &format!("Output file {} does not exist", path));
            return Ok(false);
        }
        atomic_copy(&source, &self.reference_path(path))?;
        tracing::debug!(path, "copied output into reference tree");
        Ok(true)
    }

    /// Digest reference copies of `paths` into the reference manifest
    ///
    /// Entries already present are only rehashed when `force` is set.
    ///
    /// # Errors
    ///
    /// Checksum errors other than `FileUnavailable`.
    pub fn add_to_manifest(&mut self, paths: &[String], force: bool) -> Result<AddOutcome> {
        let sources: Vec<(String, PathBuf)> = paths
            .iter()
            .map(|p| (p.clone(), self.reference_path(p)))
            .collect();
        self.manifest.add(
            sources,
            &self.layout.hash_kinds,
            self.computer.as_ref(),
            force,
        )
    }

    /// Accept the current outputs of `paths` as the new reference
    ///
    /// Each path is copied over its reference copy; when `update_manifest` is
    /// set, exactly the copied paths are rehashed into the manifest. Outputs
    /// that do not exist are warned about and skipped. Nothing is persisted
    /// until [`dump`](Self::dump).
    ///
    /// Every path is validated before anything is copied. If a copy fails
    /// partway, the paths already copied are still rehashed so the manifest
    /// matches the reference tree.
    ///
    /// Returns the paths actually copied.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a path that escapes the tree, `Io` if a copy
    /// fails, or checksum errors while rehashing.
    pub fn update_reference(&mut self, paths: &[String], update_manifest: bool) -> Result<Vec<String>> {
        if let Some(path) = paths.iter().find(|p| !is_contained(p)) {
            return Err(invalid_output_path(path).with_op("update_reference"));
        }

        let mut copied = Vec::new();
        let mut failure = None;
        for path in paths {
            match self.copy_to_reference(path) {
                Ok(true) => copied.push(path.clone()),
                Ok(false) => {}
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if update_manifest && !copied.is_empty() {
            self.add_to_manifest(&copied, true)?;
        }
        match failure {
            Some(e) => Err(e),
            None => Ok(copied),
        }
    }

    /// Persist the in-memory reference manifest
    ///
    /// # Errors
    ///
    /// `Serialization` or `Io` from [`dump_manifest`].
    pub fn dump(&self) -> Result<()> {
        dump_manifest(&self.layout.manifest_path, &self.manifest)
    }

    /// Digest every declared output in the output tree into a fresh manifest
    ///
    /// Outputs that do not exist are left out.
    ///
    /// # Errors
    ///
    /// Checksum errors other than `FileUnavailable`.
    pub fn digest_outputs(&self) -> Result<Manifest> {
        let sources: Vec<(String, PathBuf)> = self
            .layout
            .output_files
            .iter()
            .map(|p| (p.clone(), self.output_path(p)))
            .collect();
        let mut current = Manifest::new();
        let outcome = current.add(
            sources,
            &self.layout.hash_kinds,
            self.computer.as_ref(),
            true,
        )?;
        for path in &outcome.unavailable {
            tracing::debug!(path = path.as_str(), "output missing from current run");
        }
        Ok(current)
    }
}

/// A relative path with no root, prefix or `..` components
fn is_contained(path: &str) -> bool {
    let path = Path::new(path);
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
