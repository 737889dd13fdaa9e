//! Pagination state machine
//!
//! Tracks the current listing page within `[1, max_pages]` and the reason
//! the run stopped. The state lives for one run only and is never persisted.

use crate::config::PAGE_PLACEHOLDER;

/// Why a crawl run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every page up to the configured bound was processed
    MaxPagesReached,
    /// A listing page yielded zero item links; normal end of the listing
    EmptyPage { page: u32 },
    /// Navigating to a listing page failed; already-persisted items remain
    NavigationFailed { page: u32 },
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaxPagesReached => write!(f, "reached the page bound"),
            Self::EmptyPage { page } => write!(f, "page {} had no items", page),
            Self::NavigationFailed { page } => write!(f, "navigation to page {} failed", page),
        }
    }
}

/// Pagination state for one crawl run
#[derive(Debug)]
pub struct CrawlState {
    page_number: u32,
    max_pages: u32,
    termination: Option<TerminationReason>,
}

impl CrawlState {
    pub fn new(max_pages: u32) -> Self {
        Self {
            page_number: 1,
            max_pages,
            termination: None,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.page_number
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    /// Marks the run as ended
    pub fn terminate(&mut self, reason: TerminationReason) {
        if self.termination.is_none() {
            self.termination = Some(reason);
        }
    }

    /// Moves to the next page, terminating once the bound is exhausted
    pub fn advance(&mut self) {
        if self.page_number >= self.max_pages {
            self.terminate(TerminationReason::MaxPagesReached);
        } else {
            self.page_number += 1;
        }
    }
}

/// Substitutes the page number into the listing URL template
pub fn page_url(template: &str, page: u32) -> String {
    template.replace(PAGE_PLACEHOLDER, &page.to_string())
}
