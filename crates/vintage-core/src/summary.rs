//! Descriptive rollups over the accumulated merged table.

use std::collections::BTreeSet;

use crate::types::{MergedRecord, SummaryRecord};
use crate::{VintageError, VintageResult};

/// Compute summary statistics. Read-only; requires a non-empty merged table.
pub fn summarize(merged: &[MergedRecord]) -> VintageResult<SummaryRecord> {
    let first = merged.first().ok_or_else(|| {
        VintageError::InsufficientData("cannot summarize an empty merged table".into())
    })?;

    let mut accounts = BTreeSet::new();
    let mut overdue_accounts = BTreeSet::new();
    let mut vintage_min = first.vintage_month;
    let mut vintage_max = first.vintage_month;
    let mut book_min = first.book_month;
    let mut book_max = first.book_month;
    let mut total_overdue: u64 = 0;
    let mut total_ever_bad: u64 = 0;

    for record in merged {
        accounts.insert(record.account_id.as_str());
        if record.overdue_days > 0 {
            overdue_accounts.insert(record.account_id.as_str());
        }
        vintage_min = vintage_min.min(record.vintage_month);
        vintage_max = vintage_max.max(record.vintage_month);
        book_min = book_min.min(record.book_month);
        book_max = book_max.max(record.book_month);
        total_overdue += u64::from(record.overdue_days);
        total_ever_bad += record.ever_bad;
    }

    Ok(SummaryRecord {
        total_accounts: accounts.len(),
        total_records: merged.len(),
        vintage_month_min: vintage_min,
        vintage_month_max: vintage_max,
        earliest_book_month: book_min,
        latest_book_month: book_max,
        total_overdue_days: total_overdue,
        total_ever_bad_days: total_ever_bad,
        accounts_with_overdue: overdue_accounts.len(),
    })
}
