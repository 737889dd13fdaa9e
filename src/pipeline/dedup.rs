//! Dedup gate over the product store
//!
//! The canonical external purchase link is the dedup key. The gate FAILS
//! OPEN: if the store query itself errors, the item is treated as new and a
//! warning is logged. Under transient store errors this can let a duplicate
//! through; that risk is accepted rather than dropping items on a flaky
//! store.

use crate::storage::ProductStore;

/// Outcome of checking an external link against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecision {
    /// Not seen before; proceed to extraction and persistence
    New,
    /// Already stored; skip the item
    Duplicate,
}

/// Checks an external purchase link against the persisted store
pub fn check_link(store: &dyn ProductStore, external_link: &str) -> DedupDecision {
    match store.exists_by_link(external_link) {
        Ok(true) => DedupDecision::Duplicate,
        Ok(false) => DedupDecision::New,
        Err(e) => {
            tracing::warn!(
                "Dedup query failed for {}: {}. Failing open, item treated as new.",
                external_link,
                e
            );
            DedupDecision::New
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{test_record, ProductRecord, SqliteStore, StorageResult};

    #[test]
    fn test_unknown_link_is_new() {
        let store = SqliteStore::new_in_memory().unwrap();
        assert_eq!(check_link(&store, "never-seen"), DedupDecision::New);
    }

    #[test]
    fn test_stored_link_is_duplicate() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store.insert(&test_record("link-1")).unwrap();
        assert_eq!(check_link(&store, "link-1"), DedupDecision::Duplicate);
    }

    struct FailingStore;

    impl crate::storage::ProductStore for FailingStore {
        fn exists_by_link(&self, _external_link: &str) -> StorageResult<bool> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "store down").into())
        }

        fn insert(&mut self, _record: &ProductRecord) -> StorageResult<()> {
            unreachable!("dedup never inserts")
        }

        fn count(&self) -> StorageResult<u64> {
            Ok(0)
        }

        fn all(&self) -> StorageResult<Vec<ProductRecord>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_query_failure_fails_open() {
        assert_eq!(check_link(&FailingStore, "link-1"), DedupDecision::New);
    }
}
