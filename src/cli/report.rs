use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_store;
use crate::error::{PennyError, Result};
use crate::fmt;
use crate::reports::{select_range, summarize, window_bounds, WindowPolicy};
use crate::store::ExpenseStore;

pub fn today() -> Result<()> {
    run(WindowPolicy::Today, "Today")
}

pub fn day(date: &str) -> Result<()> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| PennyError::Other(format!("Invalid date: {date} (expected YYYY-MM-DD)")))?;
    run(WindowPolicy::Day(parsed), date)
}

pub fn month(month: &str) -> Result<()> {
    let (year, month_num) = parse_month(month)?;
    run(WindowPolicy::Month { year, month: month_num }, month)
}

fn parse_month(s: &str) -> Result<(i32, u32)> {
    let invalid = || PennyError::Other(format!("Invalid month: {s} (expected YYYY-MM)"));
    let (y, m) = s.split_once('-').ok_or_else(invalid)?;
    let year = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn run(policy: WindowPolicy, label: &str) -> Result<()> {
    let (start, end) = window_bounds(policy)?;

    let store = open_store()?;
    let records = store.list_records()?;
    let selected = select_range(&records, start, end);
    let summary = summarize(&selected);

    println!("{}", format!("Expenses: {label}").bold());

    if selected.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Category", "Note", "Amount", "Source"]);
    for r in &selected {
        table.add_row(vec![
            Cell::new(fmt::datetime(r.transaction_datetime)),
            Cell::new(&r.category),
            Cell::new(&r.note),
            Cell::new(fmt::money(r.amount, &r.currency)),
            Cell::new(r.source.as_str()),
        ]);
    }
    println!("{table}");

    // Totals stay per currency; there is no combined figure.
    for (currency, total) in &summary.totals {
        println!("{}", fmt::money(*total, currency).bold());
    }
    println!(
        "{} {}",
        summary.count,
        if summary.count == 1 { "transaction" } else { "transactions" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-01").unwrap(), (2024, 1));
        assert_eq!(parse_month("2024-12").unwrap(), (2024, 12));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-00").is_err());
        assert!(parse_month("202401").is_err());
        assert!(parse_month("jan 2024").is_err());
    }
}
