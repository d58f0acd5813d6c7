//! Reproducibility check command
//!
//! Usage: morte check --model <NAME> --output <DIR> --reference <DIR> [--json]

use super::{CommandResult, ModelArgs, Verdict};
use clap::Args;
use morte_core::diff::render_human_summary;
use morte_engine::{CheckConfig, ReconciliationEngine};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
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

    /// Print the diff as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute check command
pub fn execute(args: CheckArgs) -> CommandResult {
    let profile = args.model.profile()?;
    let mut config = CheckConfig::for_model(&profile, &args.reference);
    if let Some(manifest) = args.manifest {
        config = config.with_manifest_path(manifest);
    }

    let mut engine = ReconciliationEngine::new(&config, &args.output)?;
    engine.setup()?;
    let diff = engine.compare();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        print!("{}", render_human_summary(&diff));
    }

    Ok(if diff.is_reproducible() {
        Verdict::Pass
    } else {
        Verdict::Fail
    })
}
