use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::error::{Result, TallyError};
use crate::models::Transaction;

/// Records dated within `[start, end]`, oldest first. Same-day records keep
/// their relative order.
pub fn filter_by_range(
    collection: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Transaction>> {
    if start > end {
        return Err(TallyError::Range { start, end });
    }
    let mut matched: Vec<Transaction> = collection
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect();
    // `sort_by_key` is stable.
    matched.sort_by_key(|t| t.date);
    debug!(
        "{} of {} transactions fall in {start}..={end}",
        matched.len(),
        collection.len()
    );
    Ok(matched)
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(TallyError::Range { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn month(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| TallyError::InvalidRange(format!("no such month {year:04}-{month:02}")))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| TallyError::InvalidRange(format!("no such month {year:04}-{month:02}")))?;
        Self::new(start, end)
    }

    pub fn year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(TallyError::InvalidRange(format!("no such year {year}"))),
        }
    }

    /// Pick the range a caller asked for. Explicit bounds win, then a month, then
    /// a year; with nothing given the current year of `today` is used.
    pub fn resolve(
        year: Option<i32>,
        month: Option<u32>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self> {
        match (from, to) {
            (Some(from), Some(to)) => return Self::new(from, to),
            (Some(_), None) => {
                return Err(TallyError::InvalidRange(
                    "--from requires --to (both date boundaries must be specified)".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(TallyError::InvalidRange(
                    "--to requires --from (both date boundaries must be specified)".to_string(),
                ));
            }
            (None, None) => {}
        }
        match (year, month) {
            (Some(y), Some(m)) => Self::month(y, m),
            (None, Some(m)) => Self::month(today.year(), m),
            (Some(y), None) => Self::year(y),
            (None, None) => Self::year(today.year()),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn filter(&self, collection: &[Transaction]) -> Result<Vec<Transaction>> {
        filter_by_range(collection, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn txn(date: NaiveDate, cents: i64, description: &str) -> Transaction {
        Transaction::new(date, Decimal::new(cents, 2), Category::Expense, description)
    }

    #[test]
    fn test_filter_is_inclusive_and_sorted() {
        let all = vec![
            txn(d(2024, 2, 1), 5000, "utilities"),
            txn(d(2024, 1, 10), 20000, "groceries"),
            txn(d(2023, 12, 31), 100, "too early"),
            txn(d(2024, 1, 1), 300, "first day"),
            txn(d(2024, 1, 31), 400, "last day"),
        ];
        let got = filter_by_range(&all, d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let names: Vec<_> = got.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["first day", "groceries", "last day"]);
    }

    #[test]
    fn test_filter_ties_keep_original_order() {
        let day = d(2024, 5, 5);
        let all = vec![
            txn(day, 1, "a"),
            txn(d(2024, 5, 4), 1, "earlier"),
            txn(day, 1, "b"),
            txn(day, 1, "c"),
        ];
        let got = filter_by_range(&all, d(2024, 5, 1), d(2024, 5, 31)).unwrap();
        let names: Vec<_> = got.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["earlier", "a", "b", "c"]);
    }

    #[test]
    fn test_filter_single_day_range() {
        let all = vec![txn(d(2024, 5, 5), 1, "a"), txn(d(2024, 5, 6), 1, "b")];
        let got = filter_by_range(&all, d(2024, 5, 5), d(2024, 5, 5)).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].description, "a");
    }

    #[test]
    fn test_filter_rejects_inverted_range() {
        let err = filter_by_range(&[], d(2024, 2, 1), d(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, TallyError::Range { .. }));
    }

    #[test]
    fn test_filter_empty_result_is_ok() {
        let all = vec![txn(d(2024, 5, 5), 1, "a")];
        assert!(filter_by_range(&all, d(2020, 1, 1), d(2020, 12, 31)).unwrap().is_empty());
        assert!(filter_by_range(&[], d(2020, 1, 1), d(2020, 12, 31)).unwrap().is_empty());
    }

    #[test]
    fn test_month_range_handles_year_end_and_leap_years() {
        assert_eq!(DateRange::month(2024, 2).unwrap().end, d(2024, 2, 29));
        assert_eq!(DateRange::month(2023, 2).unwrap().end, d(2023, 2, 28));
        let dec = DateRange::month(2024, 12).unwrap();
        assert_eq!((dec.start, dec.end), (d(2024, 12, 1), d(2024, 12, 31)));
        assert!(matches!(DateRange::month(2024, 13), Err(TallyError::InvalidRange(_))));
    }

    #[test]
    fn test_resolve_precedence() {
        let today = d(2025, 6, 15);
        let r = DateRange::resolve(Some(2023), Some(4), Some(d(2024, 1, 1)), Some(d(2024, 1, 31)), today)
            .unwrap();
        assert_eq!((r.start, r.end), (d(2024, 1, 1), d(2024, 1, 31)));

        let r = DateRange::resolve(Some(2023), Some(4), None, None, today).unwrap();
        assert_eq!((r.start, r.end), (d(2023, 4, 1), d(2023, 4, 30)));

        let r = DateRange::resolve(Some(2023), None, None, None, today).unwrap();
        assert_eq!((r.start, r.end), (d(2023, 1, 1), d(2023, 12, 31)));

        let r = DateRange::resolve(None, None, None, None, today).unwrap();
        assert_eq!((r.start, r.end), (d(2025, 1, 1), d(2025, 12, 31)));
    }

    #[test]
    fn test_resolve_rejects_lone_bound() {
        let today = d(2025, 6, 15);
        let err = DateRange::resolve(None, None, Some(d(2025, 1, 1)), None, today).unwrap_err();
        assert!(err.to_string().contains("--from requires --to"), "got: {err}");
        let err = DateRange::resolve(None, None, None, Some(d(2025, 1, 1)), today).unwrap_err();
        assert!(err.to_string().contains("--to requires --from"), "got: {err}");
    }

    #[test]
    fn test_resolve_rejects_inverted_bounds() {
        let today = d(2025, 6, 15);
        let err = DateRange::resolve(None, None, Some(d(2025, 2, 1)), Some(d(2025, 1, 1)), today)
            .unwrap_err();
        assert!(matches!(err, TallyError::Range { .. }));
    }

    #[test]
    fn test_range_filter_and_contains() {
        let r = DateRange::month(2024, 1).unwrap();
        assert!(r.contains(d(2024, 1, 31)));
        assert!(!r.contains(d(2024, 2, 1)));
        let all = vec![txn(d(2024, 2, 1), 1, "feb"), txn(d(2024, 1, 2), 1, "jan")];
        assert_eq!(r.filter(&all).unwrap().len(), 1);
    }
}
