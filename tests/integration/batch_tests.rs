//! End-to-end tests: domain list in, address and error tables out

use address_trawl::config::{parse_config, Config};
use address_trawl::crawler::{trawl, ErrorIndicator};
use address_trawl::input::{load_sites, SiteInput};
use address_trawl::output::{CsvOutput, OutputHandler};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn site_with_page(page: &str, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("<html><body>{}</body></html>", body))
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;
    server
}

async fn site_with_root_status(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

fn host(server: &MockServer) -> String {
    server.address().to_string()
}

fn test_config(dir: &TempDir) -> Config {
    let toml = format!(
        r#"
[fetcher]
timeout-secs = 5

[batch]
workers = 3

[output]
addresses-path = "{}"
errors-path = "{}"
"#,
        dir.path().join("addresses.csv").display(),
        dir.path().join("errors.csv").display()
    );
    parse_config(&toml).expect("Failed to parse test config")
}

#[tokio::test]
async fn test_full_run_writes_both_tables() {
    let dir = TempDir::new().unwrap();

    let springfield = site_with_page(
        "/contact",
        r#"<span class="city">Springfield</span><span class="postcode">97477</span>"#,
    )
    .await;
    let gone = site_with_root_status(410).await;
    let landing = site_with_root_status(200).await;
    let portland = site_with_page("/homepage", r#"<span class="city">Portland</span>"#).await;

    let list = format!(
        "domain,name\n{},Springfield\n{},Gone\n127.0.0.1:1,Dead\n{},Landing\nexample.org/fr,Intl\n{},Portland\n",
        host(&springfield),
        host(&gone),
        host(&landing),
        host(&portland)
    );
    let input_path = dir.path().join("sites.csv");
    std::fs::write(&input_path, list).unwrap();

    let config = test_config(&dir);
    let sites = load_sites(&input_path, &config.input.domain_column).unwrap();
    assert_eq!(sites.len(), 6);

    let report = trawl(&config, &sites, std::future::pending())
        .await
        .expect("Run failed");

    assert!(!report.interrupted);
    assert_eq!(report.results.len(), 6);

    // Results stay in input order regardless of completion order
    let order: Vec<&str> = report.results.iter().map(|r| r.website.as_str()).collect();
    let expected: Vec<&str> = sites.iter().map(SiteInput::website).collect();
    assert_eq!(order, expected);

    assert_eq!(report.results[1].error, Some(ErrorIndicator::HttpStatus(410)));
    assert_eq!(report.results[2].error, Some(ErrorIndicator::NetworkFailure));
    assert_eq!(report.results[3].reportable_error(), None);

    let output = CsvOutput::from_config(&config.output);
    let written = output.write_report(&report).unwrap();
    assert_eq!(written.address_rows, 2);
    assert_eq!(written.error_rows, 3);

    let addresses = std::fs::read_to_string(output.addresses_path()).unwrap();
    assert_eq!(
        addresses,
        format!(
            "Website,Country,Region,City,Postcode,Road,Road Number\n\
             {},,,Springfield,97477,,\n\
             {},,,Portland,,,\n",
            host(&springfield),
            host(&portland)
        )
    );

    let errors = std::fs::read_to_string(output.errors_path()).unwrap();
    assert_eq!(
        errors,
        format!(
            "Website,Error\n{},410\n127.0.0.1:1,Error\nexample.org/fr,Error\n",
            host(&gone)
        )
    );
}

#[tokio::test]
async fn test_run_without_errors_skips_error_table() {
    let dir = TempDir::new().unwrap();
    let site = site_with_page("/home", r#"<span class="street">Main St</span><span class="streetNr">12</span>"#).await;

    let config = test_config(&dir);
    let sites = vec![SiteInput::parse(&host(&site))];

    let report = trawl(&config, &sites, std::future::pending()).await.unwrap();
    let output = CsvOutput::from_config(&config.output);
    let written = output.write_report(&report).unwrap();

    assert_eq!(written.address_rows, 1);
    assert_eq!(written.error_rows, 0);
    assert!(output.addresses_path().exists());
    assert!(!output.errors_path().exists());

    let addresses = std::fs::read_to_string(output.addresses_path()).unwrap();
    assert!(addresses.ends_with(",,,,,Main St,12\n"));
}

#[tokio::test]
async fn test_selector_override_from_config() {
    let dir = TempDir::new().unwrap();
    let site = site_with_page("/contact", r#"<div class="addr-city">Salem</div>"#).await;

    let mut config = test_config(&dir);
    config
        .selectors
        .insert("city".to_string(), vec!["div.addr-city".to_string()]);

    let sites = vec![SiteInput::parse(&host(&site))];
    let report = trawl(&config, &sites, std::future::pending()).await.unwrap();

    let records = report.address_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].city.as_deref(), Some("Salem"));
}

#[tokio::test]
async fn test_shutdown_before_start_keeps_nothing() {
    let dir = TempDir::new().unwrap();
    let site = site_with_page("/contact", r#"<span class="city">Salem</span>"#).await;

    let config = test_config(&dir);
    let sites = vec![SiteInput::parse(&host(&site))];

    let report = trawl(&config, &sites, std::future::ready(())).await.unwrap();

    assert!(report.interrupted);
    assert!(report.results.is_empty());
    assert_eq!(report.total_sites, 1);
}

#[tokio::test]
async fn test_website_column_echoes_input_value() {
    let dir = TempDir::new().unwrap();
    let site = site_with_page("/contact", r#"<span class="city">Salem</span>"#).await;
    let raw = format!("HTTP://{}/", host(&site));

    let config = test_config(&dir);
    let sites = vec![SiteInput::parse(&raw)];
    let report = trawl(&config, &sites, std::future::pending()).await.unwrap();

    let records = report.address_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].website, raw);
}
