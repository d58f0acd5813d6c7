//! Per-check configuration value

use crate::registry::ModelProfile;
use morte_core::HashKind;
use morte_store::StoreLayout;
use std::path::{Path, PathBuf};

/// File name of the manifest inside the reference directory
pub const MANIFEST_FILE_NAME: &str = "manifest.yaml";

/// Everything the engine needs to know about one model's outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub output_files: Vec<String>,
    pub hash_kinds: Vec<HashKind>,
    pub reference_dir: PathBuf,
    pub manifest_path: PathBuf,
}

impl CheckConfig {
    /// `sha256` digests and a manifest at `<reference_dir>/manifest.yaml`
    pub fn new<I, S>(reference_dir: impl Into<PathBuf>, output_files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reference_dir = reference_dir.into();
        Self {
            output_files: output_files.into_iter().map(Into::into).collect(),
            hash_kinds: default_hash_kinds(),
            manifest_path: reference_dir.join(MANIFEST_FILE_NAME),
            reference_dir,
        }
    }

    pub fn for_model(profile: &ModelProfile, reference_dir: impl Into<PathBuf>) -> Self {
        Self::new(reference_dir, profile.output_files.iter().cloned())
            .with_hash_kinds(profile.hash_kinds.clone())
    }

    pub fn with_hash_kinds(mut self, hash_kinds: Vec<HashKind>) -> Self {
        self.hash_kinds = hash_kinds;
        self
    }

    pub fn with_manifest_path(mut self, manifest_path: impl Into<PathBuf>) -> Self {
        self.manifest_path = manifest_path.into();
        self
    }

    /// Store layout for a run whose outputs live in `base_dir`
    pub fn layout(&self, base_dir: &Path) -> StoreLayout {
        StoreLayout {
            base_dir: base_dir.to_path_buf(),
            reference_dir: self.reference_dir.clone(),
            manifest_path: self.manifest_path.clone(),
            output_files: self.output_files.clone(),
            hash_kinds: self.hash_kinds.clone(),
        }
    }
}

pub fn default_hash_kinds() -> Vec<HashKind> {
    vec![HashKind::sha256()]
}
