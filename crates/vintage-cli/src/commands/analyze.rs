use clap::Args;
use serde_json::{json, Value};

use crate::commands::{parse_quarter_months, run_pipeline, series_to_json};
use crate::config::AnalysisConfig;
use crate::export;

/// Arguments for the full analysis run
#[derive(Args)]
pub struct AnalyzeArgs {
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

    /// Write the vintage tables and processed data as CSV
    #[arg(long)]
    pub export: bool,

    /// Directory for exported files (created if absent)
    #[arg(long, default_value = "./output")]
    pub output_dir: String,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = AnalysisConfig::load(args.config_file.as_deref())?;
    let raw_months = if args.quarter_months.is_empty() {
        config.quarter_months.clone()
    } else {
        args.quarter_months.clone()
    };
    let cohorts = parse_quarter_months(&raw_months)?;
    let turning_point = args.turning_point.unwrap_or(config.turning_point_month);

    let analyzer = run_pipeline(&args.credit_file, &args.book_file)?;
    let summary = analyzer.summarize()?;
    let series = analyzer.quarterly_performance(&cohorts)?;

    let mut payload = json!({
        "summary": serde_json::to_value(&summary)?,
        "quarter_months": cohorts.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
        "turning_point_month": turning_point,
        "series": series_to_json(&series),
    });

    if args.export {
        let written = export::export_results(&analyzer, args.output_dir.as_ref())?;
        let paths: Vec<String> = written
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        payload["exports"] = json!(paths);
    }

    Ok(payload)
}
