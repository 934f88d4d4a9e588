// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::http_fetcher;
use hireradar::infrastructure::search::sitemap::SitemapDiscovery;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sitemap_xml(uri: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{uri}/about</loc></url>
  <url><loc>
    {uri}/careers
  </loc></url>
  <url><loc>{uri}/jobs?team=a&amp;city=b</loc></url>
</urlset>"#
    )
}

#[tokio::test]
async fn test_discovers_urls_from_declared_sitemap() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("User-agent: *\nDisallow:\nSitemap: {}/sitemap.xml\n", uri)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_xml(&uri)))
        .expect(1)
        .mount(&server)
        .await;

    let urls = SitemapDiscovery::new(http_fetcher())
        .extract_urls_from_sitemap(&uri)
        .await;

    assert_eq!(
        urls,
        vec![
            format!("{}/about", uri),
            format!("{}/careers", uri),
            format!("{}/jobs?team=a&city=b", uri),
        ]
    );
}

#[tokio::test]
async fn test_relative_sitemap_declaration() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("sitemap: /maps/site.xml"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/maps/site.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_xml(&uri)))
        .expect(1)
        .mount(&server)
        .await;

    let index = SitemapDiscovery::new(http_fetcher())
        .try_discover(&uri)
        .await
        .unwrap();
    assert_eq!(index.sitemap_url, format!("{}/maps/site.xml", uri));
    assert_eq!(index.urls.len(), 3);
}

#[tokio::test]
async fn test_no_sitemap_declared_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin\n"))
        .mount(&server)
        .await;

    let urls = SitemapDiscovery::new(http_fetcher())
        .extract_urls_from_sitemap(&server.uri())
        .await;
    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_missing_robots_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let urls = SitemapDiscovery::new(http_fetcher())
        .extract_urls_from_sitemap(&server.uri())
        .await;
    assert!(urls.is_empty());
}
