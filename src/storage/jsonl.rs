//! Append-only JSON Lines fallback store
//!
//! One record per line, flushed as it is written, so a partial run never
//! loses the items it already accepted. Dedup keys are loaded into memory
//! when the store opens and maintained across inserts.

use crate::storage::traits::{ProductStore, StorageResult};
use crate::storage::ProductRecord;
use crate::VeilleError;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// JSON Lines product store
pub struct JsonlStore {
    path: PathBuf,
    file: File,
    links: HashSet<String>,
    count: u64,
}

impl JsonlStore {
    /// Opens (or creates) the stream file at the given path
    ///
    /// Existing records are scanned once to seed the dedup key set; a line
    /// that fails to parse ends the open with an error rather than silently
    /// forgetting keys.
    pub fn new(path: &Path) -> Result<Self, VeilleError> {
        let mut links = HashSet::new();
        let mut count = 0;

        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record: ProductRecord =
                    serde_json::from_str(&line).map_err(crate::storage::StorageError::from)?;
                links.insert(record.external_link);
                count += 1;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            links,
            count,
        })
    }
}

impl ProductStore for JsonlStore {
    fn exists_by_link(&self, external_link: &str) -> StorageResult<bool> {
        Ok(self.links.contains(external_link))
    }

    fn insert(&mut self, record: &ProductRecord) -> StorageResult<()> {
        let line = serde_json::to_string(record)?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        self.links.insert(record.external_link.clone());
        self.count += 1;
        Ok(())
    }

    fn count(&self) -> StorageResult<u64> {
        Ok(self.count)
    }

    fn all(&self) -> StorageResult<Vec<ProductRecord>> {
        let mut records = Vec::new();
        let reader = BufReader::new(File::open(&self.path)?);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }
        Ok(records)
    }
}
