//! Browsing capability traits
//!
//! The crawler depends on this capability surface only, never on a concrete
//! automation technology. A page is a navigation context: the orchestrator
//! keeps one open for the listing pages and acquires a second, short-lived
//! one per item detail fetch. Releasing a context is dropping the value, so
//! it happens on every exit path.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while browsing
#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Navigation to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Selector '{selector}' did not appear on {url}")]
    SelectorWait { url: String, selector: String },

    #[error("Failed to open a page context: {0}")]
    OpenPage(String),
}

/// Result type for browsing operations
pub type BrowseResult<T> = Result<T, BrowseError>;

/// A detached snapshot of a DOM element
///
/// Handles are snapshots, not live references: text and attributes are
/// captured at query time.
#[derive(Debug, Clone, Default)]
pub struct Element {
    text: String,
    attributes: HashMap<String, String>,
}

impl Element {
    pub fn new(text: impl Into<String>, attributes: HashMap<String, String>) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }

    /// The element's visible text content, trimmed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of the named attribute, if present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A single navigation context
#[async_trait]
pub trait Page: Send {
    /// Navigates to the URL, suspending until the page is loaded or the
    /// timeout elapses
    async fn navigate(&mut self, url: &str, timeout: Duration) -> BrowseResult<()>;

    /// Waits (bounded) for at least one element matching the selector
    async fn wait_for_selector(&mut self, selector: &str, timeout: Duration) -> BrowseResult<()>;

    /// All elements currently matching the selector
    fn query_all(&self, selector: &str) -> Vec<Element>;

    /// First element currently matching the selector
    fn query_first(&self, selector: &str) -> Option<Element>;

    /// Scrolls to the bottom of the page so lazily rendered content loads
    async fn scroll_to_bottom(&mut self);
}

/// Factory for navigation contexts
#[async_trait]
pub trait Browser: Send + Sync {
    /// Opens a fresh page context
    async fn open_page(&self) -> BrowseResult<Box<dyn Page>>;
}
