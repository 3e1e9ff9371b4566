/// Fallback note for manual entries submitted with a blank note field.
pub const DEFAULT_NOTE: &str = "No description";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSource {
    Manual,
    Imported,
}

impl TransactionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Imported => "imported",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Self::Manual),
            "imported" => Some(Self::Imported),
            _ => None,
        }
    }
}

/// A persisted expense. `id` and `created_timestamp` are assigned by the
/// store on insert and never change afterwards.
#[derive(Debug, Clone)]
pub struct ExpenseRecord {
    pub id: i64,
    pub source: TransactionSource,
    /// Minor currency units (cents), strictly positive.
    pub amount: i64,
    pub currency: String,
    pub category: String,
    pub note: String,
    /// Nanoseconds since the Unix epoch.
    pub transaction_datetime: i64,
    /// Nanoseconds since the Unix epoch, set at persistence time.
    pub created_timestamp: i64,
}

/// A parsed, validated, not-yet-persisted transaction awaiting duplicate
/// reconciliation. Only its materialized ExpenseRecord form is ever stored.
#[derive(Debug, Clone)]
pub struct CandidateTransaction {
    pub amount: i64,
    pub currency: String,
    pub category: String,
    pub note: String,
    pub transaction_datetime: i64,
    pub fingerprint: String,
}

/// Outcome of one reconciliation pass. The three counts partition the
/// candidate batch exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
}

/// Canonical note defaulting: trims whitespace, substitutes the placeholder
/// when nothing is left. Call sites must not re-implement this.
pub fn normalize_note(note: &str) -> String {
    let trimmed = note.trim();
    if trimmed.is_empty() {
        DEFAULT_NOTE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_roundtrip() {
        assert_eq!(TransactionSource::from_str("manual"), Some(TransactionSource::Manual));
        assert_eq!(TransactionSource::from_str("imported"), Some(TransactionSource::Imported));
        assert_eq!(TransactionSource::from_str("presentbin"), None);
        assert_eq!(TransactionSource::Imported.as_str(), "imported");
    }

    #[test]
    fn test_normalize_note() {
        assert_eq!(normalize_note("Lunch"), "Lunch");
        assert_eq!(normalize_note("  Lunch  "), "Lunch");
        assert_eq!(normalize_note(""), DEFAULT_NOTE);
        assert_eq!(normalize_note("   "), DEFAULT_NOTE);
    }
}
