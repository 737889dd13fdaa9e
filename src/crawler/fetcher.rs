//! Item detail fetcher
//!
//! Opens a short-lived page context per item, navigates with bounded retry,
//! and pulls the raw fields off the detail page. Missing elements yield
//! empty fields; only navigation can fail an item.

use crate::browser::{Browser, BrowseResult, Page};
use crate::crawler::selectors;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

static SHOP_FROM_LOGO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"logo-(.*?)\.jpg").unwrap());

/// Raw fields pulled from one item's detail page
///
/// Ephemeral: created here, consumed within one orchestrator iteration,
/// never retained.
#[derive(Debug, Clone)]
pub struct RawListingItem {
    /// Detail page URL
    pub source_url: String,
    /// Item name as displayed
    pub name: String,
    /// Price text as displayed, unnormalized
    pub price_text: String,
    /// Free-text specification block
    pub details_text: String,
    /// Source-shop logo image URL
    pub shop_logo_url: String,
    /// Shop name pattern-matched from the logo filename
    pub shop: String,
    /// Outbound purchase redirect; the dedup key
    pub external_link: String,
}

/// Navigates with a bounded number of attempts
///
/// Intermediate failures are logged at debug and retried immediately; only
/// the final attempt's failure is returned.
pub async fn navigate_with_attempts(
    page: &mut dyn Page,
    url: &str,
    timeout: Duration,
    attempts: u32,
) -> BrowseResult<()> {
    let attempts = attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match page.navigate(url, timeout).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!("Attempt {}/{} for {} failed: {}", attempt, attempts, url, e);
                last_error = Some(e);
            }
        }
    }

    // attempts >= 1, so at least one error was recorded
    Err(last_error.expect("no attempt was made"))
}

/// Derives the shop name from the source logo filename
///
/// Logos follow the `logo-<shop>.jpg` convention; anything else yields an
/// empty shop name.
pub fn shop_from_logo(logo_url: &str) -> String {
    SHOP_FROM_LOGO
        .captures(logo_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Fetches raw item fields from detail pages
pub struct ItemFetcher {
    timeout: Duration,
    attempts: u32,
}

impl ItemFetcher {
    pub fn new(timeout: Duration, attempts: u32) -> Self {
        Self { timeout, attempts }
    }

    /// Retrieves one item's raw fields
    ///
    /// Acquires its own page context, released when this call returns on
    /// any path. Element lookups never fail: an absent element becomes an
    /// empty field and processing continues.
    pub async fn fetch(&self, browser: &dyn Browser, url: &str) -> BrowseResult<RawListingItem> {
        let mut page = browser.open_page().await?;

        navigate_with_attempts(page.as_mut(), url, self.timeout, self.attempts).await?;

        // Render completion: tolerate an item page without the title block
        // rather than failing the item.
        if let Err(e) = page.wait_for_selector(selectors::ITEM_TITLE, self.timeout).await {
            tracing::debug!("Title block missing on {}: {}", url, e);
        }

        let name = page
            .query_first(selectors::ITEM_TITLE)
            .map(|el| el.text().to_string())
            .unwrap_or_default();

        let price_text = page
            .query_first(selectors::ITEM_PRICE)
            .map(|el| el.text().to_string())
            .unwrap_or_default();

        let shop_logo_url = page
            .query_first(selectors::SHOP_LOGO)
            .and_then(|el| el.attribute("src").map(str::to_string))
            .unwrap_or_default();

        let details_text = page
            .query_first(selectors::ITEM_DETAILS)
            .map(|el| el.text().to_string())
            .unwrap_or_default();

        let external_link = page
            .query_first(selectors::EXTERNAL_LINK)
            .and_then(|el| el.attribute("href").map(str::to_string))
            .unwrap_or_default();

        let shop = shop_from_logo(&shop_logo_url);

        Ok(RawListingItem {
            source_url: url.to_string(),
            name,
            price_text,
            details_text,
            shop_logo_url,
            shop,
            external_link,
        })
    }
}
