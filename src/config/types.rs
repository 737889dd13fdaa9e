use serde::Deserialize;

/// Main configuration structure for Veille
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Listing URL template; must contain the `{page}` placeholder
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Upper bound on the number of listing pages to visit
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Items whose name starts with this word (after diacritic/case folding)
    /// are skipped before dedup and extraction. Empty disables the filter.
    #[serde(rename = "stop-word", default)]
    pub stop_word: String,

    /// Navigation timeout for listing and detail pages (milliseconds)
    #[serde(rename = "page-timeout-ms", default = "default_page_timeout")]
    pub page_timeout_ms: u64,

    /// Timeout when waiting for the listing container to render (milliseconds)
    #[serde(rename = "selector-timeout-ms", default = "default_selector_timeout")]
    pub selector_timeout_ms: u64,

    /// Navigation attempts per item detail page
    #[serde(rename = "fetch-attempts", default = "default_fetch_attempts")]
    pub fetch_attempts: u32,
}

fn default_page_timeout() -> u64 {
    60_000
}

fn default_selector_timeout() -> u64 {
    60_000
}

fn default_fetch_attempts() -> u32 {
    3
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent string sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

/// Where accepted records are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// SQLite database
    Store,
    /// Append-only JSON Lines stream
    File,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub target: OutputTarget,

    /// Path to the SQLite database file (used when target = "store")
    #[serde(rename = "database-path", default)]
    pub database_path: String,

    /// Path to the JSON Lines stream file (used when target = "file")
    #[serde(rename = "stream-path", default)]
    pub stream_path: String,
}
