use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{PennyError, Result};
use crate::models::ExpenseRecord;

// ---------------------------------------------------------------------------
// Window policies
// ---------------------------------------------------------------------------

/// Rule for deriving an inclusive start/end timestamp pair, in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPolicy {
    /// The current calendar day, derived from the current moment.
    Today,
    /// A caller-supplied calendar day.
    Day(NaiveDate),
    /// First instant of the month through its last instant.
    Month { year: i32, month: u32 },
}

/// Inclusive `(start, end)` bounds of a window in nanoseconds since epoch.
pub fn window_bounds(policy: WindowPolicy) -> Result<(i64, i64)> {
    match policy {
        WindowPolicy::Today => day_bounds(Local::now().date_naive()),
        WindowPolicy::Day(date) => day_bounds(date),
        WindowPolicy::Month { year, month } => {
            let first = NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| PennyError::Other(format!("Invalid month: {year:04}-{month:02}")))?;
            let next_first = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)
            }
            .ok_or_else(|| PennyError::Other(format!("Invalid month: {year:04}-{month:02}")))?;
            let start = local_nanos(start_of_day(first))?;
            let end = local_nanos(start_of_day(next_first))? - 1;
            Ok((start, end))
        }
    }
}

fn day_bounds(date: NaiveDate) -> Result<(i64, i64)> {
    let next = date
        .succ_opt()
        .ok_or_else(|| PennyError::Other(format!("Date out of range: {date}")))?;
    let start = local_nanos(start_of_day(date))?;
    // Last nanosecond of the day, so the window is inclusive on both ends.
    let end = local_nanos(start_of_day(next))? - 1;
    Ok((start, end))
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).expect("midnight is always valid")
}

pub(crate) fn local_nanos(naive: NaiveDateTime) -> Result<i64> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .and_then(|dt| dt.timestamp_nanos_opt())
        .ok_or_else(|| PennyError::Other(format!("Timestamp out of range: {naive}")))
}

// ---------------------------------------------------------------------------
// Filter + per-currency totals
// ---------------------------------------------------------------------------

/// Records with `start <= transaction_datetime <= end`, most recent first.
/// The sort is stable, so equal timestamps retain input order.
pub fn select_range(records: &[ExpenseRecord], start: i64, end: i64) -> Vec<ExpenseRecord> {
    let mut selected: Vec<ExpenseRecord> = records
        .iter()
        .filter(|r| r.transaction_datetime >= start && r.transaction_datetime <= end)
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.transaction_datetime.cmp(&a.transaction_datetime));
    selected
}

/// Per-currency amount sums over a filtered set. Totals are never combined
/// across currencies. An empty set has an empty map, which keeps "no data"
/// distinguishable from "data summing to zero".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSummary {
    pub totals: BTreeMap<String, i64>,
    pub count: usize,
}

pub fn summarize(records: &[ExpenseRecord]) -> RangeSummary {
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.currency.clone()).or_insert(0) += record.amount;
    }
    RangeSummary {
        totals,
        count: records.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionSource;

    fn record(id: i64, amount: i64, currency: &str, tdt: i64) -> ExpenseRecord {
        ExpenseRecord {
            id,
            source: TransactionSource::Manual,
            amount,
            currency: currency.to_string(),
            category: "Food".to_string(),
            note: "x".to_string(),
            transaction_datetime: tdt,
            created_timestamp: 0,
        }
    }

    #[test]
    fn test_select_range_inclusive_boundaries() {
        let records = vec![
            record(1, 100, "USD", 999),
            record(2, 100, "USD", 1000),
            record(3, 100, "USD", 1500),
            record(4, 100, "USD", 2000),
            record(5, 100, "USD", 2001),
        ];
        let selected = select_range(&records, 1000, 2000);
        let ids: Vec<i64> = selected.iter().map(|r| r.id).collect();
        // Boundary records are included; newest first.
        assert_eq!(ids, vec![4, 3, 2]);
    }

    #[test]
    fn test_select_range_stable_on_ties() {
        let records = vec![
            record(1, 100, "USD", 500),
            record(2, 100, "USD", 500),
            record(3, 100, "USD", 500),
        ];
        let ids: Vec<i64> = select_range(&records, 0, 1000).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_today_window_excludes_yesterday() {
        let (start, end) = window_bounds(WindowPolicy::Today).unwrap();
        let records = vec![
            record(1, 100, "USD", start - 1),     // yesterday
            record(2, 200, "USD", start + 1_000), // this morning
        ];
        let selected = select_range(&records, start, end);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 2);
    }

    #[test]
    fn test_day_bounds_cover_whole_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let (start, end) = window_bounds(WindowPolicy::Day(date)).unwrap();
        assert!(start < end);
        let next = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        let (next_start, _) = window_bounds(WindowPolicy::Day(next)).unwrap();
        // Adjacent days tile with no gap and no overlap.
        assert_eq!(end + 1, next_start);
    }

    #[test]
    fn test_month_bounds() {
        let (start, end) = window_bounds(WindowPolicy::Month { year: 2024, month: 1 }).unwrap();
        let jan15 = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let (day_start, day_end) = window_bounds(WindowPolicy::Day(jan15)).unwrap();
        assert!(start <= day_start && day_end <= end);

        let (feb_start, _) = window_bounds(WindowPolicy::Month { year: 2024, month: 2 }).unwrap();
        assert_eq!(end + 1, feb_start);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let (_, end) = window_bounds(WindowPolicy::Month { year: 2024, month: 12 }).unwrap();
        let (jan_start, _) = window_bounds(WindowPolicy::Month { year: 2025, month: 1 }).unwrap();
        assert_eq!(end + 1, jan_start);
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(window_bounds(WindowPolicy::Month { year: 2024, month: 13 }).is_err());
        assert!(window_bounds(WindowPolicy::Month { year: 2024, month: 0 }).is_err());
    }

    #[test]
    fn test_summarize_per_currency() {
        let records = vec![
            record(1, 1250, "USD", 1),
            record(2, 500, "EUR", 2),
            record(3, 750, "USD", 3),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.totals.get("USD"), Some(&2000));
        assert_eq!(summary.totals.get("EUR"), Some(&500));
        assert_eq!(summary.totals.len(), 2);
    }

    #[test]
    fn test_summarize_empty_is_distinct_from_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.count, 0);
        assert!(summary.totals.is_empty());
    }
}
