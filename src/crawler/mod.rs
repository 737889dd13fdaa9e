//! Crawl loop: pagination, item fetching, and orchestration
//!
//! The orchestrator walks listing pages through the paginator, and per item
//! invokes the fetcher, the stop-word filter, the dedup gate, the extractor,
//! and the persistence sink, isolating every item-level failure.

mod fetcher;
mod orchestrator;
mod paginator;

pub use fetcher::{navigate_with_attempts, shop_from_logo, ItemFetcher, RawListingItem};
pub use orchestrator::{CrawlReport, Orchestrator};
pub use paginator::{page_url, CrawlState, TerminationReason};

/// CSS selectors for the listing source's markup
pub mod selectors {
    /// Item links on a listing page
    pub const LISTING_ITEM_LINK: &str = "product-card > a";
    /// Item name on a detail page
    pub const ITEM_TITLE: &str = ".ba-item-title";
    /// Displayed price on a detail page
    pub const ITEM_PRICE: &str = ".price-container .current span:first-child";
    /// Source-shop logo image
    pub const SHOP_LOGO: &str = "img.item-list-source-logo";
    /// Free-text specification block
    pub const ITEM_DETAILS: &str = "div.row.product-body-text";
    /// Outbound purchase link container
    pub const EXTERNAL_LINK: &str = ".item-list-source-external-container a";
}
