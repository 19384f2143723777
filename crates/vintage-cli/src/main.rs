mod commands;
mod config;
mod export;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::quarterly::QuarterlyArgs;
use commands::summary::SummaryArgs;

/// Consumer-credit vintage analysis
#[derive(Parser)]
#[command(
    name = "vintage",
    version,
    about = "Consumer-credit vintage analysis",
    long_about = "Tracks cumulative ever-bad delinquency by account age across \
                  origination cohorts. Reads account-month overdue observations \
                  and an account-to-book-month mapping, and produces the vintage \
                  matrix, quarterly performance curves, and summary statistics."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: summary, quarterly performance, optional export
    Analyze(AnalyzeArgs),
    /// Summary statistics over the normalized, accumulated dataset
    Summary(SummaryArgs),
    /// Quarterly performance curve for a set of cohort months
    Quarterly(QuarterlyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Summary(args) => commands::summary::run_summary(args),
        Commands::Quarterly(args) => commands::quarterly::run_quarterly(args),
        Commands::Version => {
            println!("vintage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
