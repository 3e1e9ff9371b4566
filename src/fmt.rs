use chrono::{Local, TimeZone};

/// Format minor currency units with thousands separators and the currency
/// code: 123456 / "USD" -> "USD 1,234.56". All currencies are treated as
/// two-decimal; real currency handling is out of scope.
pub fn money(minor_units: i64, currency: &str) -> String {
    let negative = minor_units < 0;
    let abs = minor_units.unsigned_abs();
    let int_part = abs / 100;
    let cents = abs % 100;

    let digits = int_part.to_string();
    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("{currency} -{with_commas}.{cents:02}")
    } else {
        format!("{currency} {with_commas}.{cents:02}")
    }
}

/// Human-readable file size for status output.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Render a nanosecond epoch timestamp as a local date-time for tables.
pub fn datetime(nanos: i64) -> String {
    Local.timestamp_nanos(nanos).format("%Y-%m-%d %H:%M").to_string()
}
