//! Morte CLI
//!
//! Command-line interface for model reproducibility and performance checks

use clap::{Parser, Subcommand};
use morte_core::logging_facility::{self, Profile};

mod commands;

use commands::Verdict;

#[derive(Debug, Parser)]
#[command(name = "morte")]
#[command(about = "Morte - model output reproducibility checks", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare a run's outputs against the reference baseline
    Check(commands::check::CheckArgs),
    /// Accept a run's outputs as the new reference baseline
    Update(commands::update::UpdateArgs),
    /// Compare a run's scheduler metrics against the reference metrics
    Perf(commands::perf::PerfArgs),
    /// List registered models
    Models(commands::models::ModelsArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args),
        Commands::Update(args) => commands::update::execute(args),
        Commands::Perf(args) => commands::perf::execute(args),
        Commands::Models(args) => commands::models::execute(args),
    };

    match result {
        Ok(Verdict::Pass) => {}
        Ok(Verdict::Fail) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
