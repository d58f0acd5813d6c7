//! Checksum manifest
//!
//! A manifest maps relative output-file paths to named digests. Entries keep
//! insertion order so the persisted text reads in the order files were
//! declared; order carries no meaning for comparison.
//!
//! ## Invariants
//!
//! - Paths are unique
//! - Every entry carries at least one digest
//!
//! ## Non-Responsibilities
//!
//! - Filesystem persistence (handled by `morte-store`)
//! - Comparison policy (handled by [`crate::diff`])

pub mod codec;

use crate::checksum::{ChecksumComputer, Digests, HashKind};
use crate::errors::{ExError, ExErrorKind, Result};
use indexmap::IndexMap;
use std::path::PathBuf;

pub use codec::{decode_manifest, encode_manifest};

/// Ordered mapping of relative path to named digests
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: IndexMap<String, Digests>,
}

/// What a call to [`Manifest::add`] did, path by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Entries created or overwritten
    pub inserted: Vec<String>,
    /// Entries already present and left untouched (`force == false`)
    pub unchanged: Vec<String>,
    /// Paths whose source file was unavailable; no entry was written
    pub unavailable: Vec<String>,
}

impl AddOutcome {
    pub fn modified(&self) -> bool {
        !self.inserted.is_empty()
    }
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry with pre-computed digests
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `digests` is empty.
    pub fn insert(&mut self, path: impl Into<String>, digests: Digests) -> Result<()> {
        let path = path.into();
        if digests.is_empty() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("manifest_insert")
                .with_path(&path)
                .with_message("a manifest entry needs at least one digest"));
        }
        // Overwriting keeps the entry's original position
        self.entries.insert(path, digests);
        Ok(())
    }

    /// Digest each `(path, source)` pair and record it under `path`
    ///
    /// Existing entries are only recomputed when `force` is set; otherwise
    /// they are left exactly as loaded. A source that is unavailable is
    /// skipped and reported in [`AddOutcome::unavailable`].
    ///
    /// # Errors
    ///
    /// Any checksum error other than `FileUnavailable` aborts the call.
    /// Entries processed before the failure keep their new values.
    pub fn add<I, P>(
        &mut self,
        sources: I,
        kinds: &[HashKind],
        computer: &dyn ChecksumComputer,
        force: bool,
    ) -> Result<AddOutcome>
    where
        I: IntoIterator<Item = (P, PathBuf)>,
        P: Into<String>,
    {
        let mut outcome = AddOutcome::default();
        for (path, source) in sources {
            let path = path.into();
            if !force && self.contains(&path) {
                outcome.unchanged.push(path);
                continue;
            }
            match computer.digest(&source, kinds) {
                Ok(digests) => {
                    self.insert(path.clone(), digests)?;
                    outcome.inserted.push(path);
                }
                Err(e) if e.kind() == ExErrorKind::FileUnavailable => {
                    outcome.unavailable.push(path);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outcome)
    }

    pub fn get(&self, path: &str) -> Option<&Digests> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Paths in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(path, digests)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Digests)> {
        self.entries.iter().map(|(path, digests)| (path.as_str(), digests))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two manifests are equal when they hold the same paths with the same
/// digests; insertion order is ignored.
impl PartialEq for Manifest {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(path, digests)| other.get(path) == Some(digests))
    }
}

impl Eq for Manifest {}
