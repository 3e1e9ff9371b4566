use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::error::{PennyError, Result};
use crate::models::{CandidateTransaction, ExpenseRecord, TransactionSource};
use crate::store::ExpenseStore;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY,
    source TEXT NOT NULL,
    amount INTEGER NOT NULL,
    currency TEXT NOT NULL,
    category TEXT NOT NULL,
    note TEXT NOT NULL,
    transaction_datetime INTEGER NOT NULL,
    created_timestamp INTEGER NOT NULL
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite-backed expense store. Ids are rowids (monotonically distinct);
/// `created_timestamp` is assigned here at insert time and never updated.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = get_connection(db_path)?;
        init_db(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn insert_expense(
        &self,
        amount: i64,
        currency: &str,
        category: &str,
        note: &str,
        transaction_datetime: i64,
        source: TransactionSource,
    ) -> Result<i64> {
        let created = now_nanos()?;
        self.conn.execute(
            "INSERT INTO expenses (source, amount, currency, category, note, transaction_datetime, created_timestamp) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                source.as_str(),
                amount,
                currency,
                category,
                note,
                transaction_datetime,
                created,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_expense(&self, id: i64) -> Result<Option<ExpenseRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, source, amount, currency, category, note, transaction_datetime, created_timestamp \
                 FROM expenses WHERE id = ?1",
                [id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Update the value fields of an existing record. `source` and
    /// `created_timestamp` are immutable. Returns false for an unknown id.
    pub fn update_expense(
        &self,
        id: i64,
        amount: i64,
        currency: &str,
        category: &str,
        note: &str,
        transaction_datetime: i64,
    ) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE expenses SET amount = ?2, currency = ?3, category = ?4, note = ?5, transaction_datetime = ?6 \
             WHERE id = ?1",
            rusqlite::params![id, amount, currency, category, note, transaction_datetime],
        )?;
        Ok(changed > 0)
    }

    /// Delete by identifier. Returns false for an unknown id.
    pub fn delete_expense(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM expenses WHERE id = ?1", [id])?;
        Ok(changed > 0)
    }

    pub fn count_by_source(&self, source: TransactionSource) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT count(*) FROM expenses WHERE source = ?1",
            [source.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl ExpenseStore for SqliteStore {
    fn list_records(&self) -> Result<Vec<ExpenseRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, source, amount, currency, category, note, transaction_datetime, created_timestamp \
             FROM expenses ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn insert_record(
        &self,
        candidate: &CandidateTransaction,
        source: TransactionSource,
    ) -> Result<i64> {
        self.insert_expense(
            candidate.amount,
            &candidate.currency,
            &candidate.category,
            &candidate.note,
            candidate.transaction_datetime,
            source,
        )
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ExpenseRecord> {
    let source: String = row.get(1)?;
    Ok(ExpenseRecord {
        id: row.get(0)?,
        source: TransactionSource::from_str(&source).unwrap_or(TransactionSource::Manual),
        amount: row.get(2)?,
        currency: row.get(3)?,
        category: row.get(4)?,
        note: row.get(5)?,
        transaction_datetime: row.get(6)?,
        created_timestamp: row.get(7)?,
    })
}

fn now_nanos() -> Result<i64> {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .ok_or_else(|| PennyError::Other("System clock out of timestamp range".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_insert_and_list() {
        let (_dir, store) = test_store();
        let id = store
            .insert_expense(1250, "USD", "Food", "Lunch", 1_705_321_800_000_000_000, TransactionSource::Manual)
            .unwrap();
        assert!(id > 0);

        let records = store.list_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].amount, 1250);
        assert_eq!(records[0].source, TransactionSource::Manual);
        assert!(records[0].created_timestamp > 0);
    }

    #[test]
    fn test_ids_are_distinct() {
        let (_dir, store) = test_store();
        let a = store
            .insert_expense(100, "USD", "Food", "a", 1, TransactionSource::Manual)
            .unwrap();
        let b = store
            .insert_expense(100, "USD", "Food", "a", 1, TransactionSource::Manual)
            .unwrap();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_update_preserves_source_and_created() {
        let (_dir, store) = test_store();
        let id = store
            .insert_expense(100, "USD", "Food", "a", 1, TransactionSource::Imported)
            .unwrap();
        let before = store.get_expense(id).unwrap().unwrap();

        assert!(store.update_expense(id, 200, "EUR", "Bills", "b", 2).unwrap());
        let after = store.get_expense(id).unwrap().unwrap();
        assert_eq!(after.amount, 200);
        assert_eq!(after.currency, "EUR");
        assert_eq!(after.source, TransactionSource::Imported);
        assert_eq!(after.created_timestamp, before.created_timestamp);
    }

    #[test]
    fn test_update_unknown_id() {
        let (_dir, store) = test_store();
        assert!(!store.update_expense(999, 200, "EUR", "Bills", "b", 2).unwrap());
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = test_store();
        let id = store
            .insert_expense(100, "USD", "Food", "a", 1, TransactionSource::Manual)
            .unwrap();
        assert!(store.delete_expense(id).unwrap());
        assert!(!store.delete_expense(id).unwrap());
        assert!(store.list_records().unwrap().is_empty());
    }

    #[test]
    fn test_count_by_source() {
        let (_dir, store) = test_store();
        store.insert_expense(100, "USD", "Food", "a", 1, TransactionSource::Manual).unwrap();
        store.insert_expense(100, "USD", "Food", "b", 2, TransactionSource::Imported).unwrap();
        store.insert_expense(100, "USD", "Food", "c", 3, TransactionSource::Imported).unwrap();
        assert_eq!(store.count_by_source(TransactionSource::Manual).unwrap(), 1);
        assert_eq!(store.count_by_source(TransactionSource::Imported).unwrap(), 2);
    }
}
