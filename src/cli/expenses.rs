use chrono::{Local, NaiveDate, NaiveTime};
use comfy_table::{Cell, Table};

use crate::cli::open_store;
use crate::error::{PennyError, Result};
use crate::fmt;
use crate::models::{normalize_note, TransactionSource};
use crate::reports::{local_nanos, select_range};
use crate::store::ExpenseStore;

/// Parse a major-unit amount string ("12.50") into positive minor units.
fn parse_amount(raw: &str) -> Result<i64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| PennyError::Other(format!("Invalid amount: {raw}")))?;
    let minor = (value * 100.0).round() as i64;
    if minor <= 0 {
        return Err(PennyError::Other(
            "Amount must be greater than 0".to_string(),
        ));
    }
    Ok(minor)
}

/// Resolve optional date/time flags to local nanoseconds; missing parts
/// default to the current local date/time.
fn parse_transaction_datetime(date: Option<&str>, time: Option<&str>) -> Result<i64> {
    let now = Local::now();
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| PennyError::Other(format!("Invalid date: {d} (expected YYYY-MM-DD)")))?,
        None => now.date_naive(),
    };
    let time = match time {
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M")
            .map_err(|_| PennyError::Other(format!("Invalid time: {t} (expected HH:MM)")))?,
        None => now.time(),
    };
    local_nanos(date.and_time(time))
}

pub fn add(
    amount: &str,
    currency: &str,
    category: &str,
    note: &str,
    date: Option<&str>,
    time: Option<&str>,
) -> Result<()> {
    let minor = parse_amount(amount)?;
    if currency.trim().is_empty() {
        return Err(PennyError::Other("Currency must not be empty".to_string()));
    }
    if category.trim().is_empty() {
        return Err(PennyError::Other("Category must not be empty".to_string()));
    }
    let transaction_datetime = parse_transaction_datetime(date, time)?;

    let store = open_store()?;
    let id = store.insert_expense(
        minor,
        currency.trim(),
        category.trim(),
        &normalize_note(note),
        transaction_datetime,
        TransactionSource::Manual,
    )?;
    println!("Added expense {id}: {}", fmt::money(minor, currency.trim()));
    Ok(())
}

pub fn list() -> Result<()> {
    let store = open_store()?;
    let records = store.list_records()?;
    let records = select_range(&records, i64::MIN, i64::MAX);

    if records.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Category", "Note", "Amount", "Source"]);
    for r in &records {
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(fmt::datetime(r.transaction_datetime)),
            Cell::new(&r.category),
            Cell::new(&r.note),
            Cell::new(fmt::money(r.amount, &r.currency)),
            Cell::new(r.source.as_str()),
        ]);
    }
    println!("{table}");
    println!("{} transactions", records.len());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn update(
    id: i64,
    amount: Option<&str>,
    currency: Option<&str>,
    category: Option<&str>,
    note: Option<&str>,
    date: Option<&str>,
    time: Option<&str>,
) -> Result<()> {
    let store = open_store()?;
    let current = store
        .get_expense(id)?
        .ok_or_else(|| PennyError::Other(format!("No expense with id {id}")))?;

    let minor = match amount {
        Some(a) => parse_amount(a)?,
        None => current.amount,
    };
    let transaction_datetime = if date.is_some() || time.is_some() {
        parse_transaction_datetime(date, time)?
    } else {
        current.transaction_datetime
    };

    store.update_expense(
        id,
        minor,
        currency.unwrap_or(&current.currency).trim(),
        category.unwrap_or(&current.category).trim(),
        &note.map(normalize_note).unwrap_or(current.note),
        transaction_datetime,
    )?;
    println!("Updated expense {id}");
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let store = open_store()?;
    if store.delete_expense(id)? {
        println!("Deleted expense {id}");
        Ok(())
    } else {
        Err(PennyError::Other(format!("No expense with id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap(), 1250);
        assert_eq!(parse_amount("12").unwrap(), 1200);
        assert_eq!(parse_amount(" 0.01 ").unwrap(), 1);
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
    }
}
