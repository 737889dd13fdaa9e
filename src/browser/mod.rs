//! Browsing capability for fetching and querying rendered pages
//!
//! The crawler talks to a [`Browser`] trait, never to a concrete HTTP or
//! automation stack. [`HttpBrowser`] is the production implementation over
//! reqwest + scraper; tests substitute scripted fakes.

mod http;
mod traits;

pub use http::{build_http_client, HttpBrowser, HttpPage};
pub use traits::{Browser, BrowseError, BrowseResult, Element, Page};
