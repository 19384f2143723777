use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier as it appears in the source tables.
pub type AccountId = String;

/// A calendar month (year + month), pinned internally to the first of the
/// month. Ordering is ascending calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(MonthKey)
    }

    /// Parse the fixed `"%b %Y"` input format, e.g. `"Jan 2024"`.
    pub fn parse(s: &str) -> Option<Self> {
        // "%b %Y" carries no day, so pin one on before handing to chrono.
        NaiveDate::parse_from_str(&format!("01 {}", s.trim()), "%d %b %Y")
            .ok()
            .map(MonthKey)
    }

    /// Parse either the `"%b %Y"` source format or an ISO date/month
    /// (`"2024-01-01"`, `"2024-01"`). Any day component is discarded:
    /// cohort matching is by year + month only.
    pub fn parse_loose(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(m) = Self::parse(s) {
            return Some(m);
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Self::new(d.year(), d.month());
        }
        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .ok()
            .map(MonthKey)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Whole calendar months from `origin` to `self`; negative when `self`
    /// precedes `origin`.
    pub fn months_since(&self, origin: MonthKey) -> i32 {
        (self.year() - origin.year()) * 12 + self.month() as i32 - origin.month() as i32
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%b %Y"))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MonthKey::parse_loose(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar month: {s}")))
    }
}

/// One row of the observations source: an account's overdue-day count for
/// one calendar month. The month stays raw text until normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub account_id: AccountId,
    pub month: String,
    pub overdue_days: u32,
}

/// One row of the book source: the month an account was originated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    pub account_id: AccountId,
    pub book_month: String,
}

pub type ObservationTable = Vec<ObservationRecord>;
pub type BookTable = Vec<BookRecord>;

/// An observation joined with its book month, carrying the derived vintage
/// offset and (after accumulation) the latched ever-bad total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedRecord {
    pub account_id: AccountId,
    pub month: MonthKey,
    pub book_month: MonthKey,
    pub overdue_days: u32,
    pub vintage_month: i32,
    pub ever_bad: u64,
}

/// Descriptive rollups over the accumulated merged table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub total_accounts: usize,
    pub total_records: usize,
    pub vintage_month_min: i32,
    pub vintage_month_max: i32,
    pub earliest_book_month: MonthKey,
    pub latest_book_month: MonthKey,
    pub total_overdue_days: u64,
    pub total_ever_bad_days: u64,
    pub accounts_with_overdue: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_month_format() {
        let m = MonthKey::parse("Jan 2024").unwrap();
        assert_eq!((m.year(), m.month()), (2024, 1));
        assert_eq!(m.to_string(), "Jan 2024");
    }

    #[test]
    fn rejects_garbage_months() {
        assert!(MonthKey::parse("Janubary 2024").is_none());
        assert!(MonthKey::parse("2024").is_none());
        assert!(MonthKey::parse("").is_none());
    }

    #[test]
    fn loose_parse_is_day_insensitive() {
        let a = MonthKey::parse_loose("2024-01-01").unwrap();
        let b = MonthKey::parse_loose("2024-01-15").unwrap();
        let c = MonthKey::parse_loose("Jan 2024").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn months_since_spans_year_boundaries() {
        let book = MonthKey::new(2023, 11).unwrap();
        let obs = MonthKey::new(2024, 2).unwrap();
        assert_eq!(obs.months_since(book), 3);
        assert_eq!(book.months_since(obs), -3);
    }
}
