//! Per-account ever-bad accumulation.
//!
//! "Ever bad" is a one-way latch: an account's cumulative overdue total
//! starts at 0 and, once any month shows overdue days, keeps accumulating
//! every subsequent month's overdue days for the rest of that account's
//! history. It never resets, even through clean months.

use crate::types::MergedRecord;

/// Fold one account's ordered overdue-day counts into its ever-bad series.
pub fn latch_series(overdue_days: &[u32]) -> Vec<u64> {
    let mut cumulative: u64 = 0;
    overdue_days
        .iter()
        .map(|&overdue| {
            if overdue > 0 || cumulative > 0 {
                cumulative += u64::from(overdue);
            }
            cumulative
        })
        .collect()
}

/// Fill in `ever_bad` across the merged table.
///
/// Records must already be sorted by account id then vintage month (the
/// normalizer guarantees this); accounts are processed as contiguous runs
/// with no cross-account state.
pub fn compute_ever_bad(merged: &mut [MergedRecord]) {
    let mut start = 0;
    while start < merged.len() {
        let account = merged[start].account_id.as_str();
        let end = start
            + merged[start..]
                .iter()
                .take_while(|r| r.account_id == account)
                .count();

        let days: Vec<u32> = merged[start..end].iter().map(|r| r.overdue_days).collect();
        for (record, ever_bad) in merged[start..end].iter_mut().zip(latch_series(&days)) {
            record.ever_bad = ever_bad;
        }
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_triggers_and_carries() {
        assert_eq!(latch_series(&[0, 5, 0, 2]), vec![0, 5, 5, 7]);
    }

    #[test]
    fn all_clean_stays_zero() {
        assert_eq!(latch_series(&[0, 0, 0]), vec![0, 0, 0]);
    }

    #[test]
    fn immediate_trigger() {
        assert_eq!(latch_series(&[3, 0, 0, 1]), vec![3, 3, 3, 4]);
    }

    #[test]
    fn empty_series() {
        assert!(latch_series(&[]).is_empty());
    }
}
