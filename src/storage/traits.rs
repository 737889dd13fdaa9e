//! Store trait and error types

use crate::storage::ProductRecord;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persisted product store
///
/// The dedup key is the external purchase link. Its uniqueness is enforced
/// only by callers checking `exists_by_link` before `insert`; the store
/// itself carries no uniqueness constraint. Under the strictly sequential,
/// single-process execution model the check-then-insert pair cannot race;
/// any future concurrent caller would reopen that gap.
pub trait ProductStore: Send {
    /// Whether a record with this external purchase link is already stored
    fn exists_by_link(&self, external_link: &str) -> StorageResult<bool>;

    /// Appends one record
    fn insert(&mut self, record: &ProductRecord) -> StorageResult<()>;

    /// Number of stored records
    fn count(&self) -> StorageResult<u64>;

    /// All stored records
    ///
    /// Used by `--stats` and tests; a read-only serving layer would consume
    /// this too.
    fn all(&self) -> StorageResult<Vec<ProductRecord>>;
}
