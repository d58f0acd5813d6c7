//! Subcommand implementations

pub mod check;
pub mod models;
pub mod perf;
pub mod update;

use clap::Args;
use morte_engine::{ModelProfile, ModelRegistry};
use std::path::{Path, PathBuf};

pub type CommandResult = Result<Verdict, Box<dyn std::error::Error>>;

/// Whether a command's check passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// Model selection shared by every per-model subcommand
#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Registered model name
    #[arg(long)]
    pub model: String,

    /// TOML file with extra `[[model]]` declarations
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ModelArgs {
    pub fn profile(&self) -> Result<ModelProfile, Box<dyn std::error::Error>> {
        let registry = load_registry(self.config.as_deref())?;
        Ok(registry.get(&self.model)?.clone())
    }
}

/// Built-in models plus any declared in `config`
pub fn load_registry(config: Option<&Path>) -> Result<ModelRegistry, Box<dyn std::error::Error>> {
    let mut registry = ModelRegistry::builtin();
    if let Some(path) = config {
        registry.extend_from_file(path)?;
    }
    Ok(registry)
}
