use crate::models::ExpenseRecord;

// ---------------------------------------------------------------------------
// Content fingerprint for duplicate detection
// ---------------------------------------------------------------------------
//
// Records imported before this tool existed carry fingerprints produced by a
// 32-bit rolling hash, so the same hash is reproduced here byte for byte.
// Collisions are possible but rare enough for practical duplicate avoidance;
// switching to a stronger hash would orphan every previously imported record.

/// Deterministic fingerprint over the five stable transaction fields.
pub fn fingerprint(
    amount: i64,
    currency: &str,
    category: &str,
    note: &str,
    transaction_datetime: i64,
) -> String {
    let data = format!("{amount}|{currency}|{category}|{note}|{transaction_datetime}");
    format!("fp_{}", to_base36(rolling_hash(&data)))
}

/// Fingerprint of a stored record, recomputed from its field values.
/// Fingerprints are not persisted; recomputation keeps the comparison
/// field-accurate without a schema change.
pub fn record_fingerprint(record: &ExpenseRecord) -> String {
    fingerprint(
        record.amount,
        &record.currency,
        &record.category,
        &record.note,
        record.transaction_datetime,
    )
}

/// Legacy rolling hash: `h = h*31 + c` over UTF-16 code units, with signed
/// 32-bit wraparound at every step. The wraparound is intentional and must
/// stay exact for fingerprint stability against the existing store.
fn rolling_hash(data: &str) -> u64 {
    let mut hash: i32 = 0;
    for unit in data.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    // Absolute value in 64-bit space so i32::MIN is well-defined.
    (hash as i64).unsigned_abs()
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}
