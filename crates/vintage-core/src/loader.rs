//! Raw tabular ingestion. Reads the two CSV sources into in-memory tables,
//! enforcing the column contract but performing no transformation beyond
//! cell-level parsing.

use std::io;

use crate::types::{BookRecord, BookTable, ObservationRecord, ObservationTable};
use crate::{VintageError, VintageResult};

const OBSERVATION_COLUMNS: [&str; 3] = ["ID", "Month", "Overdue_Days"];
const BOOK_COLUMNS: [&str; 2] = ["ID", "Book_Month"];

/// Read the account-month observations source. Requires columns
/// `ID`, `Month`, `Overdue_Days`; extra columns are ignored.
pub fn read_observations<R: io::Read>(source: R) -> VintageResult<ObservationTable> {
    let mut reader = csv::Reader::from_reader(source);
    let idx = resolve_columns(&mut reader, "observations", &OBSERVATION_COLUMNS)?;

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        let overdue_raw = field(&row, idx[2]);
        let overdue_days: u32 = overdue_raw.parse().map_err(|_| {
            VintageError::DataSource(format!(
                "observations row {}: Overdue_Days must be a non-negative integer, got '{}'",
                line + 1,
                overdue_raw
            ))
        })?;
        records.push(ObservationRecord {
            account_id: field(&row, idx[0]).to_string(),
            month: field(&row, idx[1]).to_string(),
            overdue_days,
        });
    }
    Ok(records)
}

/// Read the account → book-month source. Requires columns `ID`, `Book_Month`.
pub fn read_book<R: io::Read>(source: R) -> VintageResult<BookTable> {
    let mut reader = csv::Reader::from_reader(source);
    let idx = resolve_columns(&mut reader, "book", &BOOK_COLUMNS)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(BookRecord {
            account_id: field(&row, idx[0]).to_string(),
            book_month: field(&row, idx[1]).to_string(),
        });
    }
    Ok(records)
}

/// Map required column names to positions in the header row.
fn resolve_columns<R: io::Read>(
    reader: &mut csv::Reader<R>,
    source_name: &str,
    required: &[&str],
) -> VintageResult<Vec<usize>> {
    let headers = reader.headers()?.clone();
    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();

    for name in required {
        match headers.iter().position(|h| h.trim() == *name) {
            Some(i) => indices.push(i),
            None => missing.push(*name),
        }
    }

    if !missing.is_empty() {
        return Err(VintageError::DataSource(format!(
            "{} source is missing required column(s): {}",
            source_name,
            missing.join(", ")
        )));
    }
    Ok(indices)
}

fn field<'a>(row: &'a csv::StringRecord, idx: usize) -> &'a str {
    row.get(idx).unwrap_or("").trim()
}
