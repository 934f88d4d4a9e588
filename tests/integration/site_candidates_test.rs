// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{http_fetcher, PeakFetcher, USER_AGENT};
use hireradar::config::settings::SiteSettings;
use hireradar::engines::traits::HttpFetcher;
use hireradar::infrastructure::repositories::StaticDomainMap;
use hireradar::infrastructure::search::site_candidates::SiteCandidateSource;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CAREERS_PAGE: &str = r#"
<html>
<head>
  <title> 加入我们 </title>
  <script type="application/ld+json">
    {"@context": "https://schema.org", "@type": "JobPosting", "title": "工程师", "applicationUrl": "/apply/1"}
  </script>
</head>
<body>careers</body>
</html>
"#;

fn site_settings(page_timeout_ms: u64) -> SiteSettings {
    SiteSettings {
        max_pages: 5,
        pool_size: 2,
        page_timeout_ms,
        respect_robots: true,
    }
}

fn source_for(uri: &str, settings: &SiteSettings) -> SiteCandidateSource {
    source_with_fetcher(uri, settings, http_fetcher())
}

fn source_with_fetcher(
    uri: &str,
    settings: &SiteSettings,
    fetcher: Arc<dyn HttpFetcher>,
) -> SiteCandidateSource {
    let mut table = HashMap::new();
    table.insert("Acme".to_string(), uri.to_string());
    SiteCandidateSource::new(
        fetcher,
        Arc::new(StaticDomainMap::new(&table)),
        settings,
        &[],
        USER_AGENT,
    )
}

async fn mount_site(server: &MockServer, urls: &[&str]) {
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /private\n\nSitemap: {}/sitemap.xml\n",
            uri
        )))
        .mount(server)
        .await;

    let locs: String = urls
        .iter()
        .map(|p| format!("<url><loc>{}{}</loc></url>", uri, p))
        .collect();
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
            locs
        )))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_extracts_candidates_in_sitemap_order() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_site(&server, &["/about", "/careers", "/private/jobs", "/jobs/1", "/join"]).await;

    Mock::given(method("GET"))
        .and(path("/careers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CAREERS_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>no title</body></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/join"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/private/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CAREERS_PAGE))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CAREERS_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let links = source_for(&uri, &site_settings(2000)).extract("Acme").await;

    let got: Vec<(String, String, String)> = links
        .iter()
        .map(|l| (l.url.clone(), l.title.clone(), l.source.clone()))
        .collect();
    assert_eq!(
        got,
        vec![
            (format!("{}/apply/1", uri), "官网投递入口".to_string(), "sitemap/jsonld".to_string()),
            (format!("{}/careers", uri), "加入我们".to_string(), "sitemap".to_string()),
            (format!("{}/jobs/1", uri), "官网招聘页".to_string(), "sitemap".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unknown_company_makes_no_requests() {
    let server = MockServer::start().await;
    mount_site(&server, &["/careers"]).await;

    let links = source_for(&server.uri(), &site_settings(2000))
        .extract("Unknown Corp")
        .await;

    assert!(links.is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_slow_page_is_dropped_after_timeout() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_site(&server, &["/careers", "/jobs/slow"]).await;

    Mock::given(method("GET"))
        .and(path("/careers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CAREERS_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(CAREERS_PAGE)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let started = Instant::now();
    let links = source_for(&uri, &site_settings(300)).extract("Acme").await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|l| !l.url.contains("/jobs/slow")));
}

#[tokio::test]
async fn test_page_fetches_are_pooled_and_capped() {
    let server = MockServer::start().await;
    let uri = server.uri();
    let pages: Vec<String> = (0..10).map(|i| format!("/careers/{}", i)).collect();
    let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();
    mount_site(&server, &page_refs).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/careers/\d+$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<title>职位</title>")
                .set_delay(Duration::from_millis(150)),
        )
        .expect(5)
        .mount(&server)
        .await;

    let fetcher = PeakFetcher::new(http_fetcher());
    let settings = SiteSettings {
        max_pages: 5,
        pool_size: 2,
        page_timeout_ms: 2000,
        respect_robots: true,
    };
    let links = source_with_fetcher(&uri, &settings, fetcher.clone())
        .extract("Acme")
        .await;

    let urls: Vec<String> = links.iter().map(|l| l.url.clone()).collect();
    let expected: Vec<String> = pages[..5].iter().map(|p| format!("{}{}", uri, p)).collect();
    assert_eq!(urls, expected);
    assert_eq!(fetcher.peak(), 2);
}
