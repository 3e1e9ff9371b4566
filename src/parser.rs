use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::error::{PennyError, Result};
use crate::fingerprint::fingerprint;
use crate::models::CandidateTransaction;

// ---------------------------------------------------------------------------
// Presentbin payload parser
// ---------------------------------------------------------------------------
//
// The payload is a bare JSON array of objects, no envelope. Validation is
// all-or-nothing per batch: every entry is checked and every violation is
// reported in one aggregate error, so the user fixes all problems in one
// round-trip. Valid entries are never imported alongside invalid ones.

/// Parse raw Presentbin export text into fingerprinted candidates.
pub fn parse_presentbin(raw: &str) -> Result<Vec<CandidateTransaction>> {
    let data: Value = serde_json::from_str(raw).map_err(|_| {
        PennyError::Structural("Invalid JSON format. Please check your input.".to_string())
    })?;

    let entries = data
        .as_array()
        .ok_or_else(|| PennyError::Structural("Expected an array of transactions.".to_string()))?;

    let mut transactions = Vec::new();
    let mut errors = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        match validate_entry(index + 1, entry) {
            Ok(tx) => transactions.push(tx),
            Err(msg) => errors.push(msg),
        }
    }

    if !errors.is_empty() {
        return Err(PennyError::Validation(errors));
    }
    if transactions.is_empty() {
        return Err(PennyError::NoValidTransactions);
    }
    Ok(transactions)
}

/// Validate one entry. Checks run in a fixed order and the first violation
/// wins; the message carries the 1-based position within the payload.
fn validate_entry(position: usize, entry: &Value) -> std::result::Result<CandidateTransaction, String> {
    let amount = entry
        .get("amount")
        .and_then(Value::as_i64)
        .filter(|a| *a > 0)
        .ok_or_else(|| {
            format!("Transaction {position}: Invalid or missing amount (must be a positive number in cents)")
        })?;

    let currency = non_empty_string(entry, "currency")
        .ok_or_else(|| format!("Transaction {position}: Missing or invalid currency"))?;

    let category = non_empty_string(entry, "category")
        .ok_or_else(|| format!("Transaction {position}: Missing or invalid category"))?;

    let note = non_empty_string(entry, "note")
        .ok_or_else(|| format!("Transaction {position}: Missing or invalid note"))?;

    let transaction_datetime = match entry.get("transactionDateTime") {
        Some(Value::String(s)) => parse_datetime(s)
            .ok_or_else(|| format!("Transaction {position}: Invalid date format"))?,
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| format!("Transaction {position}: Missing or invalid transactionDateTime"))?,
        _ => {
            return Err(format!(
                "Transaction {position}: Missing or invalid transactionDateTime"
            ))
        }
    };

    let fp = fingerprint(amount, &currency, &category, &note, transaction_datetime);

    Ok(CandidateTransaction {
        amount,
        currency,
        category,
        note,
        transaction_datetime,
        fingerprint: fp,
    })
}

fn non_empty_string(entry: &Value, key: &str) -> Option<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Convert a date/time string to nanoseconds since the Unix epoch.
/// RFC 3339 first; naive date-times and bare dates are taken as UTC.
fn parse_datetime(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.timestamp_nanos_opt();
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return naive.and_utc().timestamp_nanos_opt();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_nanos_opt();
    }
    None
}
