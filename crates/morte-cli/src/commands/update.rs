//! Reference update command
//!
//! Usage: morte update --model <NAME> --output <DIR> --reference <DIR> [--file <PATH>]...

use super::{CommandResult, ModelArgs, Verdict};
use clap::Args;
use morte_engine::{CheckConfig, ReconciliationEngine};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Directory holding the run's outputs
    #[arg(long)]
    pub output: PathBuf,

    /// Directory holding the reference copies
    #[arg(long)]
    pub reference: PathBuf,

    /// Manifest path (defaults to <REFERENCE>/manifest.yaml)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Output file to accept (repeatable; all current outputs if omitted)
    #[arg(long = "file")]
    pub files: Vec<String>,
}

/// Execute update command
pub fn execute(args: UpdateArgs) -> CommandResult {
    let profile = args.model.profile()?;
    let mut config = CheckConfig::for_model(&profile, &args.reference);
    if let Some(manifest) = args.manifest {
        config = config.with_manifest_path(manifest);
    }

    let mut engine = ReconciliationEngine::new(&config, &args.output)?;
    engine.setup()?;

    let selected = (!args.files.is_empty()).then_some(args.files.as_slice());
    let copied = engine.update_reference(selected, true)?;
    engine.dump()?;

    println!("Updated reference for {} file(s)", copied.len());
    for path in &copied {
        println!("  {}", path);
    }

    Ok(Verdict::Pass)
}
