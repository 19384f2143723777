//! Fixed-calendar-window cohort aggregation: sum the filled vintage matrix
//! over a caller-chosen set of cohort months, yielding one performance
//! curve indexed by vintage month.

use std::collections::BTreeMap;

use crate::pivot::VintageMatrix;
use crate::types::MonthKey;
use crate::{VintageError, VintageResult};

/// Vintage month → summed ever-bad across the selected cohorts.
pub type PerformanceSeries = BTreeMap<i32, u64>;

/// Sum the filled matrix's rows for the requested cohort months.
///
/// Cohorts absent from the matrix are skipped; when none resolve the call
/// fails with `NoMatchingCohorts`, leaving pipeline state untouched.
/// Cells still missing after fill (a cohort's leading gap) contribute 0.
pub fn quarterly_performance(
    filled: &VintageMatrix,
    cohorts: &[MonthKey],
) -> VintageResult<PerformanceSeries> {
    let mut resolved: Vec<MonthKey> = cohorts
        .iter()
        .copied()
        .filter(|&c| filled.contains_cohort(c))
        .collect();
    resolved.sort();
    resolved.dedup();

    if resolved.is_empty() {
        let requested = cohorts
            .iter()
            .map(MonthKey::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(VintageError::NoMatchingCohorts { requested });
    }

    let mut series = PerformanceSeries::new();
    for column in filled.columns() {
        let total: u64 = resolved
            .iter()
            .map(|&cohort| filled.cell(cohort, column).unwrap_or(0))
            .sum();
        series.insert(column, total);
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivot::build_vintage_table;
    use crate::types::{MergedRecord, MonthKey};

    fn rec(id: &str, book: MonthKey, vintage: i32, ever_bad: u64) -> MergedRecord {
        MergedRecord {
            account_id: id.into(),
            month: book,
            book_month: book,
            overdue_days: 0,
            vintage_month: vintage,
            ever_bad,
        }
    }

    fn month(y: i32, m: u32) -> MonthKey {
        MonthKey::new(y, m).unwrap()
    }

    #[test]
    fn sums_across_resolved_cohorts() {
        let jan = month(2024, 1);
        let feb = month(2024, 2);
        let filled = build_vintage_table(&[
            rec("A", jan, 0, 3),
            rec("A", jan, 1, 5),
            rec("B", feb, 0, 4),
        ])
        .forward_filled();

        let series = quarterly_performance(&filled, &[jan, feb]).unwrap();
        assert_eq!(series[&0], 7);
        // feb's vintage 1 cell filled from its vintage 0 value.
        assert_eq!(series[&1], 9);
    }

    #[test]
    fn partial_matches_are_silently_skipped() {
        let jan = month(2024, 1);
        let filled = build_vintage_table(&[rec("A", jan, 0, 3)]).forward_filled();
        let series = quarterly_performance(&filled, &[jan, month(2030, 6)]).unwrap();
        assert_eq!(series[&0], 3);
    }

    #[test]
    fn zero_matches_fail() {
        let jan = month(2024, 1);
        let filled = build_vintage_table(&[rec("A", jan, 0, 3)]).forward_filled();
        let err = quarterly_performance(&filled, &[month(2030, 6)]).unwrap_err();
        assert!(matches!(err, VintageError::NoMatchingCohorts { .. }));
    }

    #[test]
    fn duplicate_requests_count_once() {
        let jan = month(2024, 1);
        let filled = build_vintage_table(&[rec("A", jan, 0, 3)]).forward_filled();
        let series = quarterly_performance(&filled, &[jan, jan]).unwrap();
        assert_eq!(series[&0], 3);
    }
}
