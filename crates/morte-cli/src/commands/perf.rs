//! Performance check command
//!
//! Usage: morte perf --model <NAME> --output <DIR> --reference-file <PATH> [--tolerance <F>]

use super::{CommandResult, ModelArgs, Verdict};
use clap::Args;
use morte_core::diagnostics::default_sink;
use morte_engine::PerformanceBaseline;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PerfArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Directory holding the run's outputs and scheduler log
    #[arg(long)]
    pub output: PathBuf,

    /// Reference metrics file (created on first run)
    #[arg(long)]
    pub reference_file: PathBuf,

    /// Largest accepted relative change per metric
    #[arg(long, default_value_t = 0.1)]
    pub tolerance: f64,
}

/// Execute perf command
pub fn execute(args: PerfArgs) -> CommandResult {
    let profile = args.model.profile()?;
    let pattern = profile
        .scheduler_log
        .as_deref()
        .ok_or_else(|| format!("model '{}' declares no scheduler log", profile.name))?;

    let mut baseline = PerformanceBaseline::from_scheduler_log(
        &args.output,
        pattern,
        &args.reference_file,
        default_sink(),
    )?;
    baseline.setup()?;
    let deviations = baseline.compare(args.tolerance)?;

    if deviations.is_empty() {
        println!(
            "Performance within tolerance ({} metric(s))",
            baseline.current().len()
        );
        return Ok(Verdict::Pass);
    }

    println!("{} metric(s) outside tolerance:", deviations.len());
    for d in &deviations {
        println!(
            "  {}: reference {} current {} ({:+.1}%)",
            d.label,
            d.reference,
            d.current,
            d.relative_change * 100.0
        );
    }
    Ok(Verdict::Fail)
}
