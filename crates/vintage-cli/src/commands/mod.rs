pub mod analyze;
pub mod quarterly;
pub mod summary;

use serde_json::{json, Value};
use vintage_core::{MonthKey, PerformanceSeries, VintageAnalyzer};

use crate::input;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Load both CSV sources and run the pipeline through the pivot stage.
pub fn run_pipeline(credit_file: &str, book_file: &str) -> CliResult<VintageAnalyzer> {
    let credit = input::file::open_csv(credit_file)?;
    let book = input::file::open_csv(book_file)?;
    let mut analyzer = VintageAnalyzer::new();
    analyzer.run_full(credit, book)?;
    Ok(analyzer)
}

/// Parse cohort month arguments; accepts "Jan 2024" and "2024-01-01" forms.
pub fn parse_quarter_months(raw: &[String]) -> CliResult<Vec<MonthKey>> {
    let mut months = Vec::with_capacity(raw.len());
    for s in raw {
        let month = MonthKey::parse_loose(s).ok_or_else(|| {
            format!("Unrecognised quarter month '{s}' (expected e.g. \"Jan 2024\" or \"2024-01-01\")")
        })?;
        months.push(month);
    }
    Ok(months)
}

/// Render a performance series as an array of row objects.
pub fn series_to_json(series: &PerformanceSeries) -> Value {
    Value::Array(
        series
            .iter()
            .map(|(vintage_month, total)| {
                json!({
                    "vintage_month": vintage_month,
                    "cumulative_overdue_days": total,
                })
            })
            .collect(),
    )
}
