use crate::error::Result;
use crate::models::{CandidateTransaction, ExpenseRecord, TransactionSource};

/// Store collaborator consumed by the import pipeline.
///
/// The store is the sole point of shared mutable state: it owns identifier
/// assignment, `created_timestamp`, and write serialization. The pipeline
/// itself never persists anything except through this trait.
pub trait ExpenseStore {
    /// All persisted records, in insertion order.
    fn list_records(&self) -> Result<Vec<ExpenseRecord>>;

    /// Persist one candidate with the given source, returning its new id.
    fn insert_record(
        &self,
        candidate: &CandidateTransaction,
        source: TransactionSource,
    ) -> Result<i64>;
}
