//! Integration tests for the crawler
//!
//! These tests use wiremock to serve listing and detail pages and drive the
//! full orchestrator loop end-to-end over the HTTP browsing backend.

use veille::browser::HttpBrowser;
use veille::config::{Config, CrawlerConfig, HttpConfig, OutputConfig, OutputTarget};
use veille::crawler::{CrawlReport, Orchestrator, TerminationReason};
use veille::storage::{ProductStore, SqliteStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(base_url: &str, max_pages: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: format!("{}/search;pagenumber={{page}}", base_url),
            max_pages,
            stop_word: "ecran".to_string(),
            page_timeout_ms: 5_000,
            selector_timeout_ms: 5_000,
            fetch_attempts: 3,
        },
        http: HttpConfig {
            user_agent: "veille-test/1.0".to_string(),
        },
        output: OutputConfig {
            target: OutputTarget::Store,
            database_path: String::new(),
            stream_path: String::new(),
        },
    }
}

/// Listing page HTML with one product-card link per href
fn listing_html(hrefs: &[&str]) -> String {
    let cards: String = hrefs
        .iter()
        .map(|href| format!(r#"<product-card><a href="{}">item</a></product-card>"#, href))
        .collect();
    format!("<html><body><div class=\"listing\">{}</div></body></html>", cards)
}

/// Detail page HTML for one item
fn detail_html(name: &str, price: &str, details: &str, external_link: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="ba-item-title">{name}</h1>
        <div class="price-container"><div class="current"><span>{price}</span><span>old price</span></div></div>
        <img class="item-list-source-logo" src="https://cdn.example/logo-techshop.jpg" />
        <div class="row product-body-text">{details}</div>
        <div class="item-list-source-external-container"><a href="{external_link}">Voir</a></div>
        </body></html>"#
    )
}

/// Mounts a listing page for the given page number
async fn mount_listing(server: &MockServer, page: u32, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/search;pagenumber={}", page)))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(hrefs)))
        .mount(server)
        .await;
}

/// Mounts a detail page at the given path
async fn mount_detail(server: &MockServer, item_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(item_path.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Runs a crawl against the mock server with the given store
async fn run_crawl(config: Config, store: Box<dyn ProductStore>) -> (CrawlReport, u64) {
    let browser = HttpBrowser::new(&config.http).expect("Failed to build browser");
    let mut orchestrator = Orchestrator::new(config, Box::new(browser), store);
    let report = orchestrator.run().await.expect("Crawl failed");
    let count = orchestrator.store().count().expect("Failed to count");
    (report, count)
}

#[tokio::test]
async fn test_full_crawl_stores_and_extracts() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &["item;p=laptop-1", "item;p=laptop-2"]).await;
    mount_listing(&server, 2, &[]).await;

    mount_detail(
        &server,
        "/item;p=laptop-1",
        detail_html(
            "PC Portable HP Pavilion",
            "1,299.000 DT",
            "PC Portable HP Pavilion 15, Intel Core i5-1235U, 16 Go, 512 Go SSD, Windows 11 Famille",
            "https://partner.example/redirect/1",
        ),
    )
    .await;
    mount_detail(
        &server,
        "/item;p=laptop-2",
        detail_html(
            "PC Portable Lenovo IdeaPad",
            "2,499.000 DT",
            "Lenovo IdeaPad 3, AMD Ryzen 7 5700U, 8 Go, 1 To HDD, FreeDOS, Gris",
            "https://partner.example/redirect/2",
        ),
    )
    .await;

    let config = create_test_config(&server.uri(), 5);
    let store = SqliteStore::new_in_memory().expect("Failed to open store");
    let browser = HttpBrowser::new(&config.http).expect("Failed to build browser");
    let mut orchestrator = Orchestrator::new(config, Box::new(browser), Box::new(store));

    let report = orchestrator.run().await.expect("Crawl failed");

    assert_eq!(report.items_stored, 2);
    assert_eq!(report.items_failed, 0);
    assert_eq!(
        report.termination,
        TerminationReason::EmptyPage { page: 2 }
    );

    let records = orchestrator.store().all().expect("Failed to read store");
    assert_eq!(records.len(), 2);

    let pavilion = records
        .iter()
        .find(|r| r.external_link == "https://partner.example/redirect/1")
        .expect("Pavilion record missing");
    assert_eq!(pavilion.name, "PC Portable HP Pavilion");
    assert_eq!(pavilion.price, "1,299.000");
    assert_eq!(pavilion.shop, "techshop");
    assert_eq!(pavilion.attributes.kind.as_deref(), Some("PC Portable"));
    assert_eq!(pavilion.attributes.processor_brand.as_deref(), Some("Intel"));
    assert_eq!(pavilion.attributes.ram.as_deref(), Some("16 Go"));
    assert_eq!(pavilion.attributes.storage.as_deref(), Some("512 Go SSD"));
    assert_eq!(pavilion.attributes.os.as_deref(), Some("Windows 11"));

    let ideapad = records
        .iter()
        .find(|r| r.external_link == "https://partner.example/redirect/2")
        .expect("IdeaPad record missing");
    assert_eq!(ideapad.attributes.ram.as_deref(), Some("8 Go"));
    assert_eq!(ideapad.attributes.storage.as_deref(), Some("1 To HDD"));
    assert_eq!(ideapad.attributes.os.as_deref(), Some("FreeDOS"));
    assert_eq!(ideapad.attributes.color.as_deref(), Some("Gris"));
}

#[tokio::test]
async fn test_stop_word_items_never_reach_the_store() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &["item;p=monitor-1", "item;p=laptop-1"]).await;
    mount_listing(&server, 2, &[]).await;

    // Name starts with "Écran"; after diacritic/case folding it matches the
    // configured stop word and must be skipped before persistence.
    mount_detail(
        &server,
        "/item;p=monitor-1",
        detail_html(
            "Écran Samsung 24\"",
            "499.000 DT",
            "Moniteur Samsung 24 pouces Full HD",
            "https://partner.example/redirect/monitor",
        ),
    )
    .await;
    mount_detail(
        &server,
        "/item;p=laptop-1",
        detail_html(
            "PC Portable Asus VivoBook",
            "1,899.000 DT",
            "Asus VivoBook 15, Intel Core i7, 16 Go, 512 Go SSD",
            "https://partner.example/redirect/laptop",
        ),
    )
    .await;

    let config = create_test_config(&server.uri(), 5);
    let store = SqliteStore::new_in_memory().expect("Failed to open store");
    let (report, count) = run_crawl(config, Box::new(store)).await;

    assert_eq!(report.items_skipped, 1);
    assert_eq!(report.items_stored, 1);
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_empty_page_stops_the_run_early() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &["item;p=laptop-1"]).await;
    mount_listing(&server, 2, &["item;p=laptop-1"]).await;
    // Page 3 has a listing container but zero item links
    mount_listing(&server, 3, &[]).await;

    // Pages 4 and 5 must never be requested
    for page in 4..=5 {
        Mock::given(method("GET"))
            .and(path(format!("/search;pagenumber={}", page)))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["x"])))
            .expect(0)
            .mount(&server)
            .await;
    }

    mount_detail(
        &server,
        "/item;p=laptop-1",
        detail_html(
            "PC Portable Dell Inspiron",
            "1,599.000 DT",
            "Dell Inspiron 15, Intel Core i5, 8 Go, 256 Go SSD",
            "https://partner.example/redirect/dell",
        ),
    )
    .await;

    let config = create_test_config(&server.uri(), 5);
    let store = SqliteStore::new_in_memory().expect("Failed to open store");
    let (report, count) = run_crawl(config, Box::new(store)).await;

    assert_eq!(report.pages_visited, 3);
    assert_eq!(
        report.termination,
        TerminationReason::EmptyPage { page: 3 }
    );
    // Same item on pages 1 and 2: stored once, deduplicated once
    assert_eq!(report.items_stored, 1);
    assert_eq!(report.items_duplicate, 1);
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_second_run_over_unchanged_source_stores_nothing() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &["item;p=laptop-1", "item;p=laptop-2"]).await;
    mount_listing(&server, 2, &[]).await;

    mount_detail(
        &server,
        "/item;p=laptop-1",
        detail_html(
            "PC Portable HP 250",
            "999.000 DT",
            "HP 250 G9, Intel Core i3, 8 Go, 256 Go SSD",
            "https://partner.example/redirect/1",
        ),
    )
    .await;
    mount_detail(
        &server,
        "/item;p=laptop-2",
        detail_html(
            "PC Portable Acer Aspire",
            "1,199.000 DT",
            "Acer Aspire 3, AMD Ryzen 5, 8 Go, 512 Go SSD",
            "https://partner.example/redirect/2",
        ),
    )
    .await;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("products.db");

    let first_store = SqliteStore::new(&db_path).expect("Failed to open store");
    let (first_report, first_count) =
        run_crawl(create_test_config(&server.uri(), 5), Box::new(first_store)).await;
    assert_eq!(first_report.items_stored, 2);
    assert_eq!(first_count, 2);

    let second_store = SqliteStore::new(&db_path).expect("Failed to reopen store");
    let (second_report, second_count) =
        run_crawl(create_test_config(&server.uri(), 5), Box::new(second_store)).await;
    assert_eq!(second_report.items_stored, 0);
    assert_eq!(second_report.items_duplicate, 2);
    assert_eq!(second_count, 2);
}

#[tokio::test]
async fn test_listing_navigation_failure_ends_run_gracefully() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &["item;p=laptop-1"]).await;
    // Page 2 is broken at the source
    Mock::given(method("GET"))
        .and(path("/search;pagenumber=2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    mount_detail(
        &server,
        "/item;p=laptop-1",
        detail_html(
            "PC Portable MSI Katana",
            "3,499.000 DT",
            "MSI Katana 15, Intel Core i7, 16 Go, 1 To SSD, RTX 4060 8 Go",
            "https://partner.example/redirect/msi",
        ),
    )
    .await;

    let config = create_test_config(&server.uri(), 5);
    let store = SqliteStore::new_in_memory().expect("Failed to open store");
    let (report, count) = run_crawl(config, Box::new(store)).await;

    assert_eq!(
        report.termination,
        TerminationReason::NavigationFailed { page: 2 }
    );
    // The item persisted on page 1 survives the graceful stop
    assert_eq!(report.items_stored, 1);
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_failing_item_does_not_abort_the_page() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &["item;p=broken", "item;p=laptop-1"]).await;
    mount_listing(&server, 2, &[]).await;

    // The broken item 404s on every attempt
    Mock::given(method("GET"))
        .and(path("/item;p=broken"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    mount_detail(
        &server,
        "/item;p=laptop-1",
        detail_html(
            "PC Portable HP Victus",
            "2,899.000 DT",
            "HP Victus 16, AMD Ryzen 7, 16 Go, 512 Go SSD, RTX 3050",
            "https://partner.example/redirect/victus",
        ),
    )
    .await;

    let config = create_test_config(&server.uri(), 5);
    let store = SqliteStore::new_in_memory().expect("Failed to open store");
    let (report, count) = run_crawl(config, Box::new(store)).await;

    assert_eq!(report.items_failed, 1);
    assert_eq!(report.items_stored, 1);
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_file_target_writes_append_only_stream() {
    let server = MockServer::start().await;

    mount_listing(&server, 1, &["item;p=laptop-1"]).await;
    mount_listing(&server, 2, &[]).await;

    mount_detail(
        &server,
        "/item;p=laptop-1",
        detail_html(
            "PC Portable Apple MacBook Air",
            "4,999.000 DT",
            "MacBook Air 13, Apple M2, 8 Go, 256 Go SSD, macOS",
            "https://partner.example/redirect/mba",
        ),
    )
    .await;

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let stream_path = dir.path().join("products.jsonl");

    let store =
        veille::storage::JsonlStore::new(&stream_path).expect("Failed to open stream store");
    let (report, count) = run_crawl(create_test_config(&server.uri(), 5), Box::new(store)).await;

    assert_eq!(report.items_stored, 1);
    assert_eq!(count, 1);

    let content = std::fs::read_to_string(&stream_path).expect("Stream file missing");
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("https://partner.example/redirect/mba"));

    // A second run against the same stream file deduplicates from it
    let store = veille::storage::JsonlStore::new(&stream_path).expect("Failed to reopen store");
    let (second_report, second_count) =
        run_crawl(create_test_config(&server.uri(), 5), Box::new(store)).await;
    assert_eq!(second_report.items_duplicate, 1);
    assert_eq!(second_count, 1);
}
