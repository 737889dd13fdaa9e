//! SQLite implementation of the product store

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ProductStore, StorageResult};
use crate::storage::ProductRecord;
use crate::VeilleError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const PRODUCT_COLUMNS: &str = "id, name, source_url, external_link, description, price, \
                               currency, shop, scraped_at, type, model, processor_brand, \
                               processor, ram, storage, gpu, screen, color, os";

/// SQLite product store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at the given path
    pub fn new(path: &Path) -> Result<Self, VeilleError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for tests)
    pub fn new_in_memory() -> Result<Self, VeilleError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductRecord> {
        Ok(ProductRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            source_url: row.get(2)?,
            external_link: row.get(3)?,
            description: row.get(4)?,
            price: row.get(5)?,
            currency: row.get(6)?,
            shop: row.get(7)?,
            scraped_at: row.get(8)?,
            attributes: crate::extract::ExtractedAttributes {
                kind: row.get(9)?,
                model: row.get(10)?,
                processor_brand: row.get(11)?,
                processor: row.get(12)?,
                ram: row.get(13)?,
                storage: row.get(14)?,
                gpu: row.get(15)?,
                screen: row.get(16)?,
                color: row.get(17)?,
                os: row.get(18)?,
            },
        })
    }
}

impl ProductStore for SqliteStore {
    fn exists_by_link(&self, external_link: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM products WHERE external_link = ?1 LIMIT 1",
                params![external_link],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn insert(&mut self, record: &ProductRecord) -> StorageResult<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO products ({}) VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
                PRODUCT_COLUMNS
            ),
            params![
                record.id,
                record.name,
                record.source_url,
                record.external_link,
                record.description,
                record.price,
                record.currency,
                record.shop,
                record.scraped_at,
                record.attributes.kind,
                record.attributes.model,
                record.attributes.processor_brand,
                record.attributes.processor,
                record.attributes.ram,
                record.attributes.storage,
                record.attributes.gpu,
                record.attributes.screen,
                record.attributes.color,
                record.attributes.os,
            ],
        )?;
        Ok(())
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn all(&self) -> StorageResult<Vec<ProductRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM products ORDER BY scraped_at, id",
            PRODUCT_COLUMNS
        ))?;

        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }
}
