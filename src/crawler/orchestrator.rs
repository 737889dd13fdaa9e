//! Crawl orchestration
//!
//! Drives pagination over the listing source and routes every item through
//! fetch → stop-word filter → dedup gate → extraction → persistence.
//! Item-level failures are logged with their (page, index) context and the
//! loop continues; page-level navigation failures end the run gracefully
//! without touching what was already persisted.

use crate::browser::{Browser, Page};
use crate::config::Config;
use crate::crawler::fetcher::ItemFetcher;
use crate::crawler::paginator::{page_url, CrawlState, TerminationReason};
use crate::crawler::selectors;
use crate::extract::{first_token_folded, FieldExtractor, RuleSet};
use crate::pipeline::{check_link, compose_record, persist, DedupDecision};
use crate::storage::ProductStore;
use crate::VeilleError;
use std::time::Duration;
use url::Url;

/// What happened to one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemOutcome {
    Stored,
    Duplicate,
    Skipped,
    Dropped,
}

/// End-of-run summary
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub pages_visited: u32,
    pub items_seen: u64,
    pub items_stored: u64,
    pub items_duplicate: u64,
    pub items_skipped: u64,
    pub items_failed: u64,
    pub termination: TerminationReason,
}

impl std::fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pages, {} items seen: {} stored, {} duplicate, {} skipped, {} failed ({})",
            self.pages_visited,
            self.items_seen,
            self.items_stored,
            self.items_duplicate,
            self.items_skipped,
            self.items_failed,
            self.termination
        )
    }
}

/// Main crawl orchestrator
///
/// Owns the browsing capability and the store for the duration of one run.
/// Execution is strictly sequential: one listing context plus one scoped
/// item context at a time, so the dedup-check-then-insert pair per external
/// link cannot interleave with itself.
pub struct Orchestrator {
    config: Config,
    browser: Box<dyn Browser>,
    store: Box<dyn ProductStore>,
    extractor: FieldExtractor,
    fetcher: ItemFetcher,
}

impl Orchestrator {
    pub fn new(config: Config, browser: Box<dyn Browser>, store: Box<dyn ProductStore>) -> Self {
        let fetcher = ItemFetcher::new(
            Duration::from_millis(config.crawler.page_timeout_ms),
            config.crawler.fetch_attempts,
        );

        Self {
            config,
            browser,
            store,
            extractor: FieldExtractor::new(RuleSet::new()),
            fetcher,
        }
    }

    /// Runs the crawl to termination and returns the summary
    pub async fn run(&mut self) -> Result<CrawlReport, VeilleError> {
        let page_timeout = Duration::from_millis(self.config.crawler.page_timeout_ms);
        let selector_timeout = Duration::from_millis(self.config.crawler.selector_timeout_ms);

        let mut listing = self.browser.open_page().await?;
        let mut state = CrawlState::new(self.config.crawler.max_pages);
        let mut report = CrawlReport {
            pages_visited: 0,
            items_seen: 0,
            items_stored: 0,
            items_duplicate: 0,
            items_skipped: 0,
            items_failed: 0,
            termination: TerminationReason::MaxPagesReached,
        };

        while !state.is_terminated() {
            let page_number = state.current_page();
            let url = page_url(&self.config.crawler.base_url, page_number);
            tracing::info!("Scraping page {}: {}", page_number, url);

            if let Err(e) = listing.navigate(&url, page_timeout).await {
                tracing::warn!(
                    "Navigation to page {} failed: {}. Ending run; stored items are kept.",
                    page_number,
                    e
                );
                state.terminate(TerminationReason::NavigationFailed { page: page_number });
                break;
            }
            report.pages_visited += 1;

            listing.scroll_to_bottom().await;

            if listing
                .wait_for_selector(selectors::LISTING_ITEM_LINK, selector_timeout)
                .await
                .is_err()
            {
                tracing::info!("No listing container on page {}. Stopping.", page_number);
                state.terminate(TerminationReason::EmptyPage { page: page_number });
                break;
            }

            let links = collect_item_links(listing.as_ref(), &url);
            if links.is_empty() {
                tracing::info!("No items found on page {}. Stopping.", page_number);
                state.terminate(TerminationReason::EmptyPage { page: page_number });
                break;
            }
            tracing::info!("Found {} items on page {}", links.len(), page_number);

            for (index, link) in links.iter().enumerate() {
                report.items_seen += 1;
                match self.process_item(link, page_number, index).await {
                    Ok(ItemOutcome::Stored) => report.items_stored += 1,
                    Ok(ItemOutcome::Duplicate) => report.items_duplicate += 1,
                    Ok(ItemOutcome::Skipped) => report.items_skipped += 1,
                    Ok(ItemOutcome::Dropped) => report.items_failed += 1,
                    Err(e) => {
                        report.items_failed += 1;
                        tracing::error!(
                            "Error processing item {} on page {} at {}: {}",
                            index + 1,
                            page_number,
                            link,
                            e
                        );
                    }
                }
            }

            state.advance();
        }

        report.termination = state
            .termination()
            .unwrap_or(TerminationReason::MaxPagesReached);
        tracing::info!("Crawl finished: {}", report);
        Ok(report)
    }

    /// Routes one item through the full pipeline
    async fn process_item(
        &mut self,
        url: &str,
        page_number: u32,
        index: usize,
    ) -> Result<ItemOutcome, VeilleError> {
        let raw = self.fetcher.fetch(self.browser.as_ref(), url).await?;

        let stop_word = &self.config.crawler.stop_word;
        if !stop_word.is_empty() && first_token_folded(&raw.name) == *stop_word {
            tracing::info!(
                "Skipping item {} on page {}: {}",
                index + 1,
                page_number,
                raw.name
            );
            return Ok(ItemOutcome::Skipped);
        }

        if check_link(self.store.as_ref(), &raw.external_link) == DedupDecision::Duplicate {
            tracing::info!(
                "Item {} on page {} already stored: {}",
                index + 1,
                page_number,
                raw.name
            );
            return Ok(ItemOutcome::Duplicate);
        }

        let attributes = self.extractor.extract(&raw.details_text);
        let record = compose_record(&raw, attributes);

        if persist(self.store.as_mut(), &record) {
            tracing::info!(
                "Stored item {} on page {}: {}",
                index + 1,
                page_number,
                raw.name
            );
            Ok(ItemOutcome::Stored)
        } else {
            Ok(ItemOutcome::Dropped)
        }
    }

    /// The store, for inspection after a run
    pub fn store(&self) -> &dyn ProductStore {
        self.store.as_ref()
    }
}

/// Collects absolutized item links from the current listing page
fn collect_item_links(listing: &dyn Page, page_url: &str) -> Vec<String> {
    let base = Url::parse(page_url).ok();

    listing
        .query_all(selectors::LISTING_ITEM_LINK)
        .iter()
        .filter_map(|element| element.attribute("href").map(str::to_string))
        .filter(|href| !href.is_empty())
        .filter_map(|href| match &base {
            Some(base) => base.join(&href).ok().map(|u| u.to_string()),
            None => Some(href),
        })
        .collect()
}
