//! Join + temporal normalization. Produces the merged table every later
//! stage consumes: book month attached, calendar months parsed, vintage
//! offsets computed, pre-book rows dropped, rows in accumulation order.

use std::collections::HashMap;

use crate::types::{BookTable, MergedRecord, MonthKey, ObservationTable};
use crate::{VintageError, VintageResult};

/// Inner-join book months onto observations and normalize.
///
/// Observations whose account has no book record are dropped (inner join).
/// Rows observed before their book month (`vintage_month < 0`) are dropped
/// as a data-quality filter. The result is stably sorted by account id then
/// vintage month, which is the order the ever-bad accumulator requires.
pub fn normalize(
    observations: &ObservationTable,
    book: &BookTable,
) -> VintageResult<Vec<MergedRecord>> {
    let mut book_raw: HashMap<&str, &str> = HashMap::with_capacity(book.len());
    for record in book {
        if book_raw
            .insert(record.account_id.as_str(), record.book_month.as_str())
            .is_some()
        {
            return Err(VintageError::DataSource(format!(
                "book source has duplicate account id '{}'",
                record.account_id
            )));
        }
    }

    // Book months are parsed at most once per account that actually joins.
    let mut book_parsed: HashMap<&str, MonthKey> = HashMap::new();
    let mut merged = Vec::new();

    for obs in observations {
        let Some(&book_month_raw) = book_raw.get(obs.account_id.as_str()) else {
            continue;
        };

        let book_month = match book_parsed.get(obs.account_id.as_str()) {
            Some(&m) => m,
            None => {
                let m = parse_month(book_month_raw, "Book_Month")?;
                book_parsed.insert(obs.account_id.as_str(), m);
                m
            }
        };
        let month = parse_month(&obs.month, "Month")?;

        let vintage_month = month.months_since(book_month);
        if vintage_month < 0 {
            continue;
        }

        merged.push(MergedRecord {
            account_id: obs.account_id.clone(),
            month,
            book_month,
            overdue_days: obs.overdue_days,
            vintage_month,
            ever_bad: 0,
        });
    }

    if merged.is_empty() {
        return Err(VintageError::InsufficientData(
            "no records survived the join and vintage filter; \
             check that the two sources share account ids and calendar ranges"
                .into(),
        ));
    }

    // Stable sort keeps same-key input order, as the accumulator assumes.
    merged.sort_by(|a, b| {
        a.account_id
            .cmp(&b.account_id)
            .then(a.vintage_month.cmp(&b.vintage_month))
    });
    Ok(merged)
}

fn parse_month(raw: &str, column: &str) -> VintageResult<MonthKey> {
    MonthKey::parse(raw).ok_or_else(|| VintageError::DateParse {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BookRecord, ObservationRecord};

    fn obs(id: &str, month: &str, overdue: u32) -> ObservationRecord {
        ObservationRecord {
            account_id: id.into(),
            month: month.into(),
            overdue_days: overdue,
        }
    }

    fn book(id: &str, month: &str) -> BookRecord {
        BookRecord {
            account_id: id.into(),
            book_month: month.into(),
        }
    }

    #[test]
    fn joins_and_computes_vintage_offsets() {
        let merged = normalize(
            &vec![obs("A", "Mar 2024", 2), obs("A", "Jan 2024", 0)],
            &vec![book("A", "Jan 2024")],
        )
        .unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].vintage_month, 0);
        assert_eq!(merged[1].vintage_month, 2);
    }

    #[test]
    fn drops_unjoined_and_pre_book_rows() {
        let merged = normalize(
            &vec![
                obs("A", "Dec 2023", 9), // predates booking
                obs("A", "Jan 2024", 1),
                obs("B", "Jan 2024", 7), // no book record
            ],
            &vec![book("A", "Jan 2024")],
        )
        .unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].account_id, "A");
        assert_eq!(merged[0].overdue_days, 1);
    }

    #[test]
    fn bad_month_aborts_the_run() {
        let err = normalize(
            &vec![obs("A", "Smarch 2024", 0)],
            &vec![book("A", "Jan 2024")],
        )
        .unwrap_err();
        match err {
            VintageError::DateParse { column, value } => {
                assert_eq!(column, "Month");
                assert_eq!(value, "Smarch 2024");
            }
            other => panic!("expected DateParse, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_book_id_rejected() {
        let err = normalize(
            &vec![obs("A", "Jan 2024", 0)],
            &vec![book("A", "Jan 2024"), book("A", "Feb 2024")],
        )
        .unwrap_err();
        assert!(matches!(err, VintageError::DataSource(_)));
    }

    #[test]
    fn empty_result_is_reported() {
        let err = normalize(
            &vec![obs("A", "Jan 2024", 0)],
            &vec![book("B", "Jan 2024")],
        )
        .unwrap_err();
        assert!(matches!(err, VintageError::InsufficientData(_)));
    }
}
