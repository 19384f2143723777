//! Cohort × vintage-month pivot.
//!
//! Rows are book-month cohorts, columns are vintage months, cells are the
//! sum of ever-bad over every merged record in that (cohort, vintage) pair.
//! Absent cells mean "no observation", never zero. The filled variant
//! forward-fills each row left to right; cells before a row's first
//! observation stay missing, and rows never borrow from each other.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{MergedRecord, MonthKey};

/// Sparse cohort × vintage matrix with deterministic ascending key order.
#[derive(Debug, Clone, Serialize)]
pub struct VintageMatrix {
    columns: BTreeSet<i32>,
    rows: BTreeMap<MonthKey, BTreeMap<i32, u64>>,
}

impl VintageMatrix {
    pub fn cell(&self, cohort: MonthKey, vintage_month: i32) -> Option<u64> {
        self.rows.get(&cohort)?.get(&vintage_month).copied()
    }

    pub fn contains_cohort(&self, cohort: MonthKey) -> bool {
        self.rows.contains_key(&cohort)
    }

    /// Vintage-month column keys, ascending. The union across all cohorts.
    pub fn columns(&self) -> impl Iterator<Item = i32> + '_ {
        self.columns.iter().copied()
    }

    /// Cohort rows in ascending calendar order.
    pub fn rows(&self) -> impl Iterator<Item = (MonthKey, &BTreeMap<i32, u64>)> {
        self.rows.iter().map(|(k, v)| (*k, v))
    }

    pub fn cohort_count(&self) -> usize {
        self.rows.len()
    }

    /// Row-wise forward fill. Each missing cell takes the nearest preceding
    /// present cell in the same row; leading gaps stay missing.
    pub fn forward_filled(&self) -> VintageMatrix {
        let mut filled_rows = BTreeMap::new();
        for (&cohort, row) in &self.rows {
            let mut filled_row = BTreeMap::new();
            let mut carry: Option<u64> = None;
            for &column in &self.columns {
                if let Some(&value) = row.get(&column) {
                    carry = Some(value);
                }
                if let Some(value) = carry {
                    filled_row.insert(column, value);
                }
            }
            filled_rows.insert(cohort, filled_row);
        }
        VintageMatrix {
            columns: self.columns.clone(),
            rows: filled_rows,
        }
    }
}

/// Aggregate the accumulated merged table into the vintage matrix.
pub fn build_vintage_table(merged: &[MergedRecord]) -> VintageMatrix {
    let mut columns = BTreeSet::new();
    let mut rows: BTreeMap<MonthKey, BTreeMap<i32, u64>> = BTreeMap::new();

    for record in merged {
        columns.insert(record.vintage_month);
        *rows
            .entry(record.book_month)
            .or_default()
            .entry(record.vintage_month)
            .or_insert(0) += record.ever_bad;
    }

    VintageMatrix { columns, rows }
}
