//! Veille: a paginated product-listing crawler
//!
//! This crate walks a paginated listing source, fetches every item's detail
//! page, turns the free-text description into structured attributes, and
//! persists records it has not seen before. Per-item failures are isolated;
//! a failing item never aborts the run.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod pipeline;
pub mod storage;

use thiserror::Error;

/// Main error type for Veille operations
#[derive(Debug, Error)]
pub enum VeilleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browse error: {0}")]
    Browse(#[from] browser::BrowseError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Veille operations
pub type Result<T> = std::result::Result<T, VeilleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use browser::{Browser, BrowseError, Element, Page};
pub use config::Config;
pub use crawler::{CrawlReport, Orchestrator, TerminationReason};
pub use extract::{ExtractedAttributes, FieldExtractor, RuleSet};
pub use storage::{ProductRecord, ProductStore};
