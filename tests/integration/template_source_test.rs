// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{http_fetcher, USER_AGENT};
use hireradar::infrastructure::search::template::TemplateSource;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PAGE: &str = r#"
<html><body>
  <ul>
    <li><a href="/company/42/jobs">字节跳动 社招职位</a></li>
    <li><a href="https://jobs.bytedance.test/campus">校园招聘</a></li>
    <li><a href="/company/42">公司主页</a></li>
    <li><a href="javascript:apply()">立即投递</a></li>
  </ul>
</body></html>
"#;

#[tokio::test]
async fn test_template_source_fetches_and_extracts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "字节跳动"))
        .and(header("user-agent", USER_AGENT))
        .and(header("accept", "text/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let template = format!("{}/search?query=${{name}}", server.uri());
    let source = TemplateSource::new(&template, &[], http_fetcher());

    let links = source.crawl_by_company_name("字节跳动", 8).await;
    let urls: Vec<String> = links.iter().map(|l| l.url.clone()).collect();

    assert_eq!(
        urls,
        vec![
            format!("{}/company/42/jobs", server.uri()),
            "https://jobs.bytedance.test/campus".to_string(),
        ]
    );
    assert_eq!(links[0].title, "字节跳动 社招职位");
    assert_eq!(links[0].source, "127.0.0.1");
    assert_eq!(links[0].description, "来源：127.0.0.1");
}

#[tokio::test]
async fn test_template_source_failure_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string(SEARCH_PAGE))
        .mount(&server)
        .await;

    let template = format!("{}/search?query=${{name}}", server.uri());
    let source = TemplateSource::new(&template, &[], http_fetcher());

    assert!(source.crawl_by_company_name("Acme", 8).await.is_empty());
    assert!(source.try_crawl("Acme", 8).await.is_err());
}

#[tokio::test]
async fn test_template_source_custom_keywords() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .mount(&server)
        .await;

    let template = format!("{}/search?query=${{name}}", server.uri());
    let source = TemplateSource::new(&template, &["主页".to_string()], http_fetcher());

    let links = source.crawl_by_company_name("Acme", 8).await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, format!("{}/company/42", server.uri()));
}
