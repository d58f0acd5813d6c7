//! Model listing command
//!
//! Usage: morte models [--config <TOML>]

use super::{load_registry, CommandResult, Verdict};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ModelsArgs {
    /// TOML file with extra `[[model]]` declarations
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute models command
pub fn execute(args: ModelsArgs) -> CommandResult {
    let registry = load_registry(args.config.as_deref())?;
    for profile in registry.iter() {
        let kinds: Vec<&str> = profile.hash_kinds.iter().map(|k| k.as_str()).collect();
        println!(
            "{}: {} output file(s) [{}]",
            profile.name,
            profile.output_files.len(),
            kinds.join(", ")
        );
        for path in &profile.output_files {
            println!("  {}", path);
        }
    }
    Ok(Verdict::Pass)
}
