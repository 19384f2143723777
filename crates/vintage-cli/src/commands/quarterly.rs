use clap::Args;
use serde_json::{json, Value};

use crate::commands::{parse_quarter_months, run_pipeline, series_to_json};
use crate::config::AnalysisConfig;

/// Arguments for quarterly performance
#[derive(Args)]
pub struct QuarterlyArgs {
    /// Path to the account-month observations CSV
    #[arg(long)]
    pub credit_file: String,

    /// Path to the account-to-book-month CSV
    #[arg(long)]
    pub book_file: String,

    /// Cohort book months to aggregate ("Jan 2024" or "2024-01-01" form)
    #[arg(long, num_args = 1..)]
    pub quarter_months: Vec<String>,

    /// Vintage month marking the expected flattening of the curve
    #[arg(long)]
    pub turning_point: Option<i32>,

    /// Path to JSON configuration file
    #[arg(long)]
    pub config_file: Option<String>,
}

pub fn run_quarterly(args: QuarterlyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = AnalysisConfig::load(args.config_file.as_deref())?;
    let raw_months = if args.quarter_months.is_empty() {
        config.quarter_months.clone()
    } else {
        args.quarter_months.clone()
    };
    let cohorts = parse_quarter_months(&raw_months)?;
    let turning_point = args.turning_point.unwrap_or(config.turning_point_month);

    let analyzer = run_pipeline(&args.credit_file, &args.book_file)?;
    let series = analyzer.quarterly_performance(&cohorts)?;

    Ok(json!({
        "quarter_months": cohorts.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
        "turning_point_month": turning_point,
        "series": series_to_json(&series),
    }))
}
