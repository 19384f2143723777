use pretty_assertions::assert_eq;

use vintage_core::types::MonthKey;
use vintage_core::{VintageAnalyzer, VintageError};

fn month(y: i32, m: u32) -> MonthKey {
    MonthKey::new(y, m).unwrap()
}

fn run_pipeline(observations: &str, book: &str) -> VintageAnalyzer {
    let mut analyzer = VintageAnalyzer::new();
    analyzer
        .run_full(observations.as_bytes(), book.as_bytes())
        .unwrap();
    analyzer
}

// ===========================================================================
// End-to-end examples
// ===========================================================================

#[test]
fn single_account_latch_carries_through_clean_months() {
    let analyzer = run_pipeline(
        "ID,Month,Overdue_Days\n\
         A,Jan 2024,0\n\
         A,Feb 2024,5\n\
         A,Mar 2024,0\n",
        "ID,Book_Month\nA,Jan 2024\n",
    );

    let merged = analyzer.merged().unwrap();
    let vintages: Vec<i32> = merged.iter().map(|r| r.vintage_month).collect();
    let ever_bad: Vec<u64> = merged.iter().map(|r| r.ever_bad).collect();
    assert_eq!(vintages, vec![0, 1, 2]);
    // Latched at vintage 1, carried into vintage 2 despite zero overdue.
    assert_eq!(ever_bad, vec![0, 5, 5]);
}

#[test]
fn two_cohorts_pivot_with_no_cross_row_fill() {
    let analyzer = run_pipeline(
        "ID,Month,Overdue_Days\n\
         A,Jan 2024,3\n\
         B,Feb 2024,4\n",
        "ID,Book_Month\nA,Jan 2024\nB,Feb 2024\n",
    );

    let jan = month(2024, 1);
    let feb = month(2024, 2);
    let table = analyzer.vintage_table().unwrap();
    assert_eq!(table.cell(jan, 0), Some(3));
    assert_eq!(table.cell(feb, 0), Some(4));

    // No data exists at vintage 1 anywhere, so even the filled table has
    // nothing there (fill only propagates from a present earlier cell).
    let filled = analyzer.filled_table().unwrap();
    assert_eq!(filled.columns().collect::<Vec<_>>(), vec![0]);
    assert_eq!(filled.cell(jan, 1), None);
    assert_eq!(filled.cell(feb, 1), None);
}

// ===========================================================================
// Latch properties
// ===========================================================================

#[test]
fn ever_bad_is_monotone_once_triggered_and_zero_before() {
    let analyzer = run_pipeline(
        "ID,Month,Overdue_Days\n\
         A,Jan 2024,0\n\
         A,Feb 2024,0\n\
         A,Mar 2024,7\n\
         A,Apr 2024,0\n\
         A,May 2024,2\n\
         Z,Jan 2024,0\n\
         Z,Feb 2024,0\n",
        "ID,Book_Month\nA,Jan 2024\nZ,Jan 2024\n",
    );

    let merged = analyzer.merged().unwrap();
    for account_rows in [&merged[..5], &merged[5..]] {
        let mut last = 0u64;
        let mut triggered = false;
        for row in account_rows {
            if row.overdue_days > 0 {
                triggered = true;
            }
            if triggered {
                assert!(row.ever_bad >= last, "latched series must not decrease");
                assert!(row.ever_bad > 0);
            } else {
                assert_eq!(row.ever_bad, 0, "must stay 0 before the first overdue");
            }
            last = row.ever_bad;
        }
    }

    // Cumulative-sum equivalence: at May (vintage 4), ever-bad equals the
    // sum of overdue days from the triggering month onward: 7 + 0 + 2.
    assert_eq!(merged[4].ever_bad, 9);
}

#[test]
fn all_zero_account_contributes_zero_everywhere() {
    let analyzer = run_pipeline(
        "ID,Month,Overdue_Days\n\
         A,Jan 2024,0\n\
         A,Feb 2024,0\n\
         A,Mar 2024,0\n",
        "ID,Book_Month\nA,Jan 2024\n",
    );
    assert!(analyzer.merged().unwrap().iter().all(|r| r.ever_bad == 0));

    let summary = analyzer.summarize().unwrap();
    assert_eq!(summary.total_ever_bad_days, 0);
    assert_eq!(summary.accounts_with_overdue, 0);
}

#[test]
fn accounts_accumulate_independently() {
    let analyzer = run_pipeline(
        "ID,Month,Overdue_Days\n\
         A,Jan 2024,9\n\
         A,Feb 2024,0\n\
         B,Jan 2024,0\n\
         B,Feb 2024,0\n",
        "ID,Book_Month\nA,Jan 2024\nB,Jan 2024\n",
    );
    let merged = analyzer.merged().unwrap();
    let b_rows: Vec<u64> = merged
        .iter()
        .filter(|r| r.account_id == "B")
        .map(|r| r.ever_bad)
        .collect();
    assert_eq!(b_rows, vec![0, 0], "A's latch must not leak into B");
}

// ===========================================================================
// Normalization
// ===========================================================================

#[test]
fn normalization_drops_exactly_the_pre_book_rows() {
    let analyzer = run_pipeline(
        "ID,Month,Overdue_Days\n\
         A,Nov 2023,4\n\
         A,Dec 2023,4\n\
         A,Jan 2024,0\n\
         A,Feb 2024,1\n",
        "ID,Book_Month\nA,Jan 2024\n",
    );
    let merged = analyzer.merged().unwrap();
    assert_eq!(merged.len(), 2);
    assert!(merged.iter().all(|r| r.vintage_month >= 0));
    // The pre-book overdue months never feed the latch.
    assert_eq!(merged[0].ever_bad, 0);
    assert_eq!(merged[1].ever_bad, 1);
}

#[test]
fn unparseable_book_month_fails_normalization() {
    let mut analyzer = VintageAnalyzer::new();
    analyzer
        .load_csv(
            "ID,Month,Overdue_Days\nA,Jan 2024,0\n".as_bytes(),
            "ID,Book_Month\nA,2024/01\n".as_bytes(),
        )
        .unwrap();
    let err = analyzer.normalize().unwrap_err();
    assert!(matches!(
        err,
        VintageError::DateParse { ref column, .. } if column == "Book_Month"
    ));
}

#[test]
fn disjoint_sources_are_reported_not_swallowed() {
    let mut analyzer = VintageAnalyzer::new();
    analyzer
        .load_csv(
            "ID,Month,Overdue_Days\nA,Jan 2024,0\n".as_bytes(),
            "ID,Book_Month\nB,Jan 2024\n".as_bytes(),
        )
        .unwrap();
    assert!(matches!(
        analyzer.normalize(),
        Err(VintageError::InsufficientData(_))
    ));
}

// ===========================================================================
// Quarterly aggregation
// ===========================================================================

fn quarterly_fixture() -> VintageAnalyzer {
    run_pipeline(
        "ID,Month,Overdue_Days\n\
         A,Jan 2024,3\n\
         A,Feb 2024,0\n\
         B,Feb 2024,4\n\
         C,Mar 2024,2\n",
        "ID,Book_Month\nA,Jan 2024\nB,Feb 2024\nC,Mar 2024\n",
    )
}

#[test]
fn quarterly_sums_resolved_cohorts_per_vintage_month() {
    let analyzer = quarterly_fixture();
    let series = analyzer
        .quarterly_performance(&[month(2024, 1), month(2024, 2), month(2024, 3)])
        .unwrap();

    // Vintage 0: 3 (Jan) + 4 (Feb) + 2 (Mar) = 9.
    assert_eq!(series[&0], 9);
    // Vintage 1: Jan cohort latched at 3; Feb and Mar forward-fill their
    // vintage-0 values into the column.
    assert_eq!(series[&1], 3 + 4 + 2);
}

#[test]
fn quarterly_partial_match_skips_absent_cohorts() {
    let analyzer = quarterly_fixture();
    let series = analyzer
        .quarterly_performance(&[month(2024, 1), month(2025, 1)])
        .unwrap();
    assert_eq!(series[&0], 3);
}

#[test]
fn quarterly_zero_matches_is_an_error() {
    let analyzer = quarterly_fixture();
    let err = analyzer
        .quarterly_performance(&[month(2025, 1), month(2025, 2)])
        .unwrap_err();
    assert!(matches!(err, VintageError::NoMatchingCohorts { .. }));
}

// ===========================================================================
// Summary statistics
// ===========================================================================

#[test]
fn summary_over_quarterly_fixture() {
    let summary = quarterly_fixture().summarize().unwrap();
    assert_eq!(summary.total_accounts, 3);
    assert_eq!(summary.total_records, 4);
    assert_eq!(summary.vintage_month_min, 0);
    assert_eq!(summary.vintage_month_max, 1);
    assert_eq!(summary.earliest_book_month, month(2024, 1));
    assert_eq!(summary.latest_book_month, month(2024, 3));
    assert_eq!(summary.total_overdue_days, 9);
    // A's latch carries 3 into Feb: 3 + 3 + 4 + 2.
    assert_eq!(summary.total_ever_bad_days, 12);
    assert_eq!(summary.accounts_with_overdue, 3);
}
