// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{http_fetcher, settings_for, CountingFetcher};
use hireradar::domain::models::link::Link;
use hireradar::domain::models::submitted_link::{LinkType, NewSubmission};
use hireradar::domain::repositories::submission_repository::SubmissionRepository;
use hireradar::infrastructure::repositories::InMemorySubmissionRepository;
use hireradar::infrastructure::search::build_service;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PAGE: &str = r#"
<html><body>
  <a href="https://jobs.bytedance.test/social">社会招聘</a>
  <a href="https://jobs.bytedance.test/campus">校园招聘</a>
  <a href="https://bytedance.test/about">关于我们</a>
</body></html>
"#;

fn urls(links: &[Link]) -> Vec<String> {
    links.iter().map(|l| l.url.clone()).collect()
}

async fn mount_search(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .mount(server)
        .await;
}

async fn submit_approved(
    repo: &InMemorySubmissionRepository,
    url: &str,
    link_type: LinkType,
) {
    let saved = repo
        .submit(NewSubmission {
            company_name: "字节跳动".to_string(),
            title: None,
            url: url.to_string(),
            link_type,
            submitter: None,
            remarks: None,
        })
        .await
        .unwrap();
    repo.approve(saved.id, Some("ok".to_string())).await.unwrap();
}

#[tokio::test]
async fn test_second_lookup_is_served_from_cache() {
    let server = MockServer::start().await;
    mount_search(&server).await;

    let fetcher = CountingFetcher::new(http_fetcher());
    let service = build_service(&settings_for(&server.uri(), "字节跳动"), fetcher.clone(), None);

    let first = service.search_links("字节跳动").await;
    let calls = fetcher.calls();
    assert!(calls > 0);

    let second = service.search_links_with_report("字节跳动有限公司").await;
    assert!(second.from_cache);
    assert_eq!(fetcher.calls(), calls);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second.links).unwrap()
    );
}

#[tokio::test]
async fn test_full_pipeline_order_and_dedup() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_search(&server).await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("Sitemap: {}/sitemap.xml", uri)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<urlset><url><loc>{}/careers</loc></url><url><loc>{}/news</loc></url></urlset>",
            uri, uri
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/careers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>加入字节</title>"))
        .mount(&server)
        .await;

    let repo = Arc::new(InMemorySubmissionRepository::new());
    submit_approved(&repo, "https://JOBS.bytedance.test/campus/", LinkType::Apply).await;
    submit_approved(&repo, "https://bytedance.test/notice", LinkType::Announcement).await;

    let submissions: Arc<dyn SubmissionRepository> = repo;
    let service = build_service(
        &settings_for(&uri, "字节跳动"),
        http_fetcher(),
        Some(submissions),
    );
    let report = service.search_links_with_report("字节跳动").await;

    assert_eq!(
        urls(&report.links),
        vec![
            "https://app.mokahr.com/search?keyword=%E5%AD%97%E8%8A%82%E8%B7%B3%E5%8A%A8".to_string(),
            "https://jobs.bytedance.test/social".to_string(),
            "https://jobs.bytedance.test/campus".to_string(),
            "https://bytedance.test/notice".to_string(),
            format!("{}/careers", uri),
        ]
    );
    assert_eq!(report.links[2].title, "校园招聘");
    assert_eq!(report.links[3].source, "submitted");
    assert_eq!(report.links[4].title, "加入字节");

    let sources: Vec<&str> = report.statuses.iter().map(|s| s.source.as_str()).collect();
    assert_eq!(sources, vec!["moka", "127.0.0.1", "submitted", "sitemap"]);
}

#[tokio::test]
async fn test_output_respects_cap() {
    let server = MockServer::start().await;
    mount_search(&server).await;

    let mut settings = settings_for(&server.uri(), "字节跳动");
    settings.links.max_per_company = 2;
    let service = build_service(&settings, http_fetcher(), None);

    let links = service.search_links("字节跳动").await;
    assert_eq!(
        urls(&links),
        vec![
            "https://app.mokahr.com/search?keyword=%E5%AD%97%E8%8A%82%E8%B7%B3%E5%8A%A8".to_string(),
            "https://jobs.bytedance.test/social".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_failing_template_does_not_affect_others() {
    let server = MockServer::start().await;
    mount_search(&server).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let healthy = build_service(&settings_for(&server.uri(), "字节跳动"), http_fetcher(), None)
        .search_links("字节跳动")
        .await;

    let mut settings = settings_for(&server.uri(), "字节跳动");
    settings
        .links
        .templates
        .insert(0, format!("{}/broken?q=${{name}}", server.uri()));
    let with_broken = build_service(&settings, http_fetcher(), None)
        .search_links_with_report("字节跳动")
        .await;

    assert_eq!(urls(&with_broken.links), urls(&healthy));
    assert_eq!(with_broken.statuses[1].outcome.label(), "failed");
}
