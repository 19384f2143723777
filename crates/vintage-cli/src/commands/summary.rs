use clap::Args;
use serde_json::Value;

use vintage_core::VintageAnalyzer;

use crate::input;

/// Arguments for summary statistics
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to the account-month observations CSV
    #[arg(long)]
    pub credit_file: String,

    /// Path to the account-to-book-month CSV
    #[arg(long)]
    pub book_file: String,
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let credit = input::file::open_csv(&args.credit_file)?;
    let book = input::file::open_csv(&args.book_file)?;

    // Summary only needs the pipeline through accumulation.
    let mut analyzer = VintageAnalyzer::new();
    analyzer.load_csv(credit, book)?;
    analyzer.normalize()?;
    analyzer.compute_ever_bad()?;

    let summary = analyzer.summarize()?;
    Ok(serde_json::to_value(summary)?)
}
