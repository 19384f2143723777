//! CSV export of the analysis artifacts: the vintage matrix, its
//! forward-filled variant, and the processed (merged + accumulated) data.

use std::fs;
use std::path::{Path, PathBuf};

use vintage_core::{VintageAnalyzer, VintageMatrix};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Write all three result files into `dir`, creating it if needed.
/// Returns the paths written.
pub fn export_results(analyzer: &VintageAnalyzer, dir: &Path) -> CliResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create output dir '{}': {}", dir.display(), e))?;

    let vintage_path = dir.join("vintage_table.csv");
    let filled_path = dir.join("vintage_table_filled.csv");
    let processed_path = dir.join("processed_data.csv");

    write_matrix(&vintage_path, analyzer.vintage_table()?)?;
    write_matrix(&filled_path, analyzer.filled_table()?)?;
    write_processed(&processed_path, analyzer)?;

    Ok(vec![vintage_path, filled_path, processed_path])
}

/// One row per cohort, one column per vintage month; missing cells stay empty.
fn write_matrix(path: &Path, matrix: &VintageMatrix) -> CliResult<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;

    let mut header = vec!["Book_Month".to_string()];
    header.extend(matrix.columns().map(|c| c.to_string()));
    writer.write_record(&header)?;

    for (cohort, _) in matrix.rows() {
        let mut row = vec![cohort.to_string()];
        for column in matrix.columns() {
            row.push(
                matrix
                    .cell(cohort, column)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_processed(path: &Path, analyzer: &VintageAnalyzer) -> CliResult<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;

    writer.write_record([
        "ID",
        "Month",
        "Book_Month",
        "Overdue_Days",
        "Vintage_Month",
        "Ever_Bad",
    ])?;
    for record in analyzer.merged()? {
        writer.write_record([
            record.account_id.as_str(),
            &record.month.to_string(),
            &record.book_month.to_string(),
            &record.overdue_days.to_string(),
            &record.vintage_month.to_string(),
            &record.ever_bad.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
