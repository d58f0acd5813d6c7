//! Model profiles by name
//!
//! Each model declares which outputs matter and where its scheduler log
//! lives. Profiles come from a built-in table, optionally extended from a
//! TOML file:
//!
//! ```toml
//! [[model]]
//! name = "cm2"
//! output_files = ["ocean/ocean.nc", "atmosphere/atm.pa"]
//! hash_kinds = ["sha256", "blake3"]
//! scheduler_log = "*.o[0-9]*"
//! ```

use crate::config::default_hash_kinds;
use morte_core::errors::{io_error, ExError, ExErrorKind, Result};
use morte_core::{ChecksumComputer, HashKind, StreamingChecksum};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One model's declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub name: String,
    pub output_files: Vec<String>,
    #[serde(default = "default_hash_kinds")]
    pub hash_kinds: Vec<HashKind>,
    /// Pattern locating the scheduler log below the output directory
    #[serde(default)]
    pub scheduler_log: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default)]
    model: Vec<ModelProfile>,
}

/// Lookup table of model profiles
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: Vec<ModelProfile>,
}

impl ModelRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `test` model
    pub fn builtin() -> Self {
        Self {
            models: vec![ModelProfile {
                name: "test".to_string(),
                output_files: vec!["foo/file1".to_string(), "bar/file2".to_string()],
                hash_kinds: default_hash_kinds(),
                scheduler_log: Some("test.o*".to_string()),
            }],
        }
    }

    /// Add a profile
    ///
    /// # Errors
    ///
    /// `Config` if the name is already registered, the profile declares no
    /// outputs or hash kinds, or a hash kind is not supported.
    pub fn register(&mut self, profile: ModelProfile) -> Result<()> {
        let config_error = |msg: String| {
            ExError::new(ExErrorKind::Config)
                .with_op("register_model")
                .with_message(msg)
        };
        if self.models.iter().any(|m| m.name == profile.name) {
            return Err(config_error(format!(
                "model '{}' is registered twice",
                profile.name
            )));
        }
        if profile.output_files.is_empty() {
            return Err(config_error(format!(
                "model '{}' declares no output files",
                profile.name
            )));
        }
        if profile.hash_kinds.is_empty() {
            return Err(config_error(format!(
                "model '{}' declares no hash kinds",
                profile.name
            )));
        }
        if let Some(kind) = profile
            .hash_kinds
            .iter()
            .find(|k| !StreamingChecksum.supports(k))
        {
            return Err(config_error(format!(
                "model '{}' uses unknown hash kind '{}'",
                profile.name, kind
            )));
        }
        self.models.push(profile);
        Ok(())
    }

    /// Register every `[[model]]` table in `text`
    ///
    /// Nothing is registered if any profile is rejected.
    ///
    /// # Errors
    ///
    /// `Config` for invalid TOML or a rejected profile.
    pub fn extend_from_toml(&mut self, text: &str) -> Result<()> {
        let file: RegistryFile = toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_model_registry")
                .with_message(e.to_string())
        })?;
        let mut staged = self.clone();
        for profile in file.model {
            staged.register(profile)?;
        }
        *self = staged;
        Ok(())
    }

    /// Register every profile in the TOML file at `path`
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as
    /// [`extend_from_toml`](Self::extend_from_toml) with the path attached.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| io_error("load_model_registry", path, e))?;
        self.extend_from_toml(&text).map_err(|e| e.with_path(path))
    }

    /// Look up a profile by name
    ///
    /// # Errors
    ///
    /// `UnknownModel`, listing the registered names as candidates.
    pub fn get(&self, name: &str) -> Result<&ModelProfile> {
        self.models.iter().find(|m| m.name == name).ok_or_else(|| {
            ExError::new(ExErrorKind::UnknownModel)
                .with_op("lookup_model")
                .with_message(format!("no model named '{}'", name))
                .with_candidates(self.names().map(str::to_string).collect())
        })
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelProfile> {
        self.models.iter()
    }
}
