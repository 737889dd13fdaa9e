//! Database schema definitions

/// SQL schema for the product store
///
/// `external_link` is the dedup key. It is indexed but deliberately NOT
/// unique: duplicate prevention is the dedup gate's check, not a schema
/// constraint.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    source_url TEXT NOT NULL,
    external_link TEXT NOT NULL,
    description TEXT NOT NULL,
    price TEXT NOT NULL,
    currency TEXT NOT NULL,
    shop TEXT NOT NULL,
    scraped_at TEXT NOT NULL,
    type TEXT,
    model TEXT,
    processor_brand TEXT,
    processor TEXT,
    ram TEXT,
    storage TEXT,
    gpu TEXT,
    screen TEXT,
    color TEXT,
    os TEXT
);

CREATE INDEX IF NOT EXISTS idx_products_external_link ON products(external_link);
CREATE INDEX IF NOT EXISTS idx_products_shop ON products(shop);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
