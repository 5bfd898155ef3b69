//! Integration tests for per-site processing against a mock HTTP server

use address_trawl::config::FetcherConfig;
use address_trawl::crawler::{process_site, ErrorIndicator, HttpFetcher, PageFetchResult, PageFetcher};
use address_trawl::extract::{AddressExtractor, AddressField};
use address_trawl::url::{Domain, DEFAULT_PROBE_PATHS};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_with(timeout_secs: u64, max_redirects: usize) -> HttpFetcher {
    let config = FetcherConfig {
        timeout_secs,
        max_redirects,
        ..FetcherConfig::default()
    };
    HttpFetcher::new(&config).expect("Failed to build HTTP client")
}

fn fetcher() -> HttpFetcher {
    fetcher_with(5, 10)
}

fn domain_for(server: &MockServer) -> Domain {
    Domain::parse(&server.address().to_string()).expect("Failed to parse mock domain")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_address_on_first_candidate() {
    let server = MockServer::start().await;
    mount_page(&server, "/homepage", r#"<span class="city">Springfield</span>"#).await;

    // A site with addresses never gets the diagnostic probe
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let extractor = AddressExtractor::new().unwrap();
    let result = process_site(&fetcher(), &extractor, &domain_for(&server), DEFAULT_PROBE_PATHS).await;

    assert_eq!(result.addresses.len(), 1);
    assert_eq!(
        result.addresses[0].get(AddressField::City),
        Some("Springfield")
    );
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_unreachable_site_reports_network_failure() {
    // Nothing listens on port 1
    let domain = Domain::parse("127.0.0.1:1").unwrap();
    let extractor = AddressExtractor::new().unwrap();

    let result = process_site(&fetcher(), &extractor, &domain, DEFAULT_PROBE_PATHS).await;

    assert!(result.addresses.is_empty());
    assert_eq!(result.error, Some(ErrorIndicator::NetworkFailure));
    assert_eq!(result.reportable_error(), Some(ErrorIndicator::NetworkFailure));
}

#[tokio::test]
async fn test_partial_address_on_later_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/homepage"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_page(&server, "/home", "<p>Welcome</p>").await;
    mount_page(&server, "/contact", r#"<span class="postcode">90210</span>"#).await;

    let extractor = AddressExtractor::new().unwrap();
    let result = process_site(&fetcher(), &extractor, &domain_for(&server), DEFAULT_PROBE_PATHS).await;

    assert_eq!(result.addresses.len(), 1);
    let address = &result.addresses[0];
    assert_eq!(address.get(AddressField::Postcode), Some("90210"));
    assert_eq!(address.len(), 1);
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_addresses_from_several_pages_keep_probe_order() {
    let server = MockServer::start().await;
    mount_page(&server, "/home", r#"<span class="city">Springfield</span>"#).await;
    mount_page(
        &server,
        "/contact",
        r#"<span class="street">Main St</span><span class="contact-text">USA</span>"#,
    )
    .await;

    let extractor = AddressExtractor::new().unwrap();
    let result = process_site(&fetcher(), &extractor, &domain_for(&server), DEFAULT_PROBE_PATHS).await;

    assert_eq!(result.addresses.len(), 2);
    assert_eq!(result.addresses[0].get(AddressField::City), Some("Springfield"));
    assert_eq!(result.addresses[1].get(AddressField::Road), Some("Main St"));
    assert_eq!(result.addresses[1].get(AddressField::Country), Some("USA"));
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_diagnostic_probe_reports_root_status() {
    let server = MockServer::start().await;

    // Every candidate is unmatched (404); the root answers 503 exactly once
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = AddressExtractor::new().unwrap();
    let result = process_site(&fetcher(), &extractor, &domain_for(&server), DEFAULT_PROBE_PATHS).await;

    assert!(result.addresses.is_empty());
    assert_eq!(result.error, Some(ErrorIndicator::HttpStatus(503)));
    assert_eq!(result.reportable_error(), Some(ErrorIndicator::HttpStatus(503)));
}

#[tokio::test]
async fn test_reachable_root_without_markers_is_not_reported() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<h1>Just a landing page</h1>").await;

    let extractor = AddressExtractor::new().unwrap();
    let result = process_site(&fetcher(), &extractor, &domain_for(&server), DEFAULT_PROBE_PATHS).await;

    assert!(result.addresses.is_empty());
    assert_eq!(result.error, Some(ErrorIndicator::HttpStatus(200)));
    assert_eq!(result.reportable_error(), None);
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/about/contact-us"))
        .mount(&server)
        .await;
    mount_page(&server, "/about/contact-us", r#"<span class="region">Oregon</span>"#).await;

    let extractor = AddressExtractor::new().unwrap();
    let result = process_site(&fetcher(), &extractor, &domain_for(&server), DEFAULT_PROBE_PATHS).await;

    assert_eq!(result.addresses.len(), 1);
    assert_eq!(result.addresses[0].get(AddressField::Region), Some("Oregon"));
}

#[tokio::test]
async fn test_redirects_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/about/contact-us"))
        .mount(&server)
        .await;
    mount_page(&server, "/about/contact-us", r#"<span class="region">Oregon</span>"#).await;

    let url = domain_for(&server).base_url().join("contact").unwrap();
    let outcome = fetcher_with(5, 0).fetch(&url).await;

    assert_eq!(outcome, PageFetchResult::HttpError { status_code: 301 });
}

#[tokio::test]
async fn test_fetch_classifies_status_codes() {
    let server = MockServer::start().await;
    mount_page(&server, "/ok", "hello").await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stack trace"))
        .mount(&server)
        .await;

    let base = domain_for(&server).base_url().clone();
    let fetcher = fetcher();

    match fetcher.fetch(&base.join("ok").unwrap()).await {
        PageFetchResult::Success { status_code, body } => {
            assert_eq!(status_code, 200);
            assert!(body.contains("hello"));
        }
        other => panic!("Expected success, got {:?}", other),
    }

    // Only 200 counts as a page with content
    assert_eq!(
        fetcher.fetch(&base.join("empty").unwrap()).await,
        PageFetchResult::HttpError { status_code: 204 }
    );
    assert_eq!(
        fetcher.fetch(&base.join("broken").unwrap()).await,
        PageFetchResult::HttpError { status_code: 500 }
    );
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page("late").set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let url = domain_for(&server).base_url().join("slow").unwrap();
    let outcome = fetcher_with(1, 10).fetch(&url).await;

    assert!(
        matches!(outcome, PageFetchResult::NetworkError { .. }),
        "Expected a network error, got {:?}",
        outcome
    );
}
