use std::collections::HashSet;

use crate::error::Result;
use crate::fingerprint::record_fingerprint;
use crate::models::{CandidateTransaction, ImportSummary, TransactionSource};
use crate::store::ExpenseStore;

// ---------------------------------------------------------------------------
// Import reconciliation
// ---------------------------------------------------------------------------

/// Reconcile a validated batch against the store and persist the
/// non-duplicate subset.
///
/// Every candidate lands in exactly one bucket: imported, skipped duplicate,
/// or failed. Duplicate detection covers both records already in the store
/// and earlier candidates within the same batch. A store failure while
/// persisting one candidate counts it as failed and the rest of the batch
/// continues; a failure listing existing records aborts before anything is
/// persisted.
pub fn reconcile(
    store: &dyn ExpenseStore,
    candidates: &[CandidateTransaction],
) -> Result<ImportSummary> {
    // Fingerprints are not persisted; recompute them from stored field
    // values so the comparison is always field-accurate.
    let existing = store.list_records()?;
    let mut seen: HashSet<String> = existing
        .iter()
        .filter(|r| r.source == TransactionSource::Imported)
        .map(record_fingerprint)
        .collect();

    let mut summary = ImportSummary {
        imported: 0,
        skipped_duplicates: 0,
        failed: 0,
    };

    for candidate in candidates {
        if seen.contains(&candidate.fingerprint) {
            summary.skipped_duplicates += 1;
            continue;
        }
        match store.insert_record(candidate, TransactionSource::Imported) {
            Ok(_) => {
                summary.imported += 1;
                seen.insert(candidate.fingerprint.clone());
            }
            // Not added to the seen-set: a later identical candidate gets
            // its own chance to persist.
            Err(_) => summary.failed += 1,
        }
    }

    Ok(summary)
}
