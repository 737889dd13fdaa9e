//! Persisted product store
//!
//! Two backends implement the same trait: SQLite (the primary target) and
//! an append-only JSON Lines stream for runs without a database. The
//! orchestrator only ever sees the trait.

mod jsonl;
mod schema;
mod sqlite;
mod traits;

pub use jsonl::JsonlStore;
pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{ProductStore, StorageError, StorageResult};

use crate::config::{OutputConfig, OutputTarget};
use crate::extract::ExtractedAttributes;
use crate::VeilleError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One persisted product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Generated identifier, unique per record
    pub id: String,

    /// Item name from the detail page
    pub name: String,

    /// Detail page URL this record was scraped from
    pub source_url: String,

    /// Outbound purchase redirect; the dedup key
    pub external_link: String,

    /// Raw free-text description
    pub description: String,

    /// Price text reduced to digits and separators
    pub price: String,

    /// Price currency code
    pub currency: String,

    /// Shop name derived from the listing source logo
    pub shop: String,

    /// RFC 3339 timestamp of when the record was composed
    pub scraped_at: String,

    /// Structured attributes, flattened into the record
    #[serde(flatten)]
    pub attributes: ExtractedAttributes,
}

/// Opens the store selected by the output configuration
pub fn open_store(config: &OutputConfig) -> Result<Box<dyn ProductStore>, VeilleError> {
    match config.target {
        OutputTarget::Store => Ok(Box::new(SqliteStore::new(Path::new(
            &config.database_path,
        ))?)),
        OutputTarget::File => Ok(Box::new(JsonlStore::new(Path::new(&config.stream_path))?)),
    }
}

#[cfg(test)]
pub(crate) fn test_record(external_link: &str) -> ProductRecord {
    ProductRecord {
        id: format!("id-{}", external_link),
        name: "PC Portable HP Pavilion".to_string(),
        source_url: "https://shop.example/item;one".to_string(),
        external_link: external_link.to_string(),
        description: "Intel Core i7, 16 Go, 512 Go SSD".to_string(),
        price: "2,499.000".to_string(),
        currency: "DT".to_string(),
        shop: "techshop".to_string(),
        scraped_at: "2026-01-01T00:00:00+00:00".to_string(),
        attributes: ExtractedAttributes {
            kind: Some("PC Portable".to_string()),
            processor_brand: Some("Intel".to_string()),
            processor: Some("Intel Core i7".to_string()),
            ram: Some("16 Go".to_string()),
            storage: Some("512 Go SSD".to_string()),
            ..Default::default()
        },
    }
}
