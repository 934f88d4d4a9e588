// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::settings::{SiteSettings, DEFAULT_KEYWORDS};
use crate::domain::models::link::{Link, SOURCE_SITEMAP, SOURCE_SITEMAP_JSONLD};
use crate::domain::repositories::domain_mapping::DomainMapping;
use crate::domain::search::SourceError;
use crate::engines::traits::{FetchRequest, HttpFetcher};
use crate::infrastructure::search::json_ld::{extract_apply_urls, page_title};
use crate::infrastructure::search::sitemap::SitemapDiscovery;
use crate::utils::robots::{product_token, RobotsRules};
use crate::utils::url_utils::resolve_url;

/// 与行业无关的招聘页 URL 特征
pub const URL_HINTS: &[&str] = &[
    "career", "jobs", "job/", "join", "recruit", "hiring", "zhaopin", "campus",
];

const PAGE_TITLE_FALLBACK: &str = "官网招聘页";
const JSON_LD_TITLE: &str = "官网投递入口";

/// 官网候选页抽取
///
/// 仅对域名可解析的公司生效：sitemap -> URL 关键词预筛 ->
/// 有界并发抓取少量候选页 -> 结构化数据 + 页面本身
#[derive(Clone)]
pub struct SiteCandidateSource {
    fetcher: Arc<dyn HttpFetcher>,
    sitemap: SitemapDiscovery,
    domains: Arc<dyn DomainMapping>,
    keywords: Vec<String>,
    max_pages: usize,
    pool_size: usize,
    page_timeout: Duration,
    respect_robots: bool,
    robots_agent: String,
}

impl SiteCandidateSource {
    pub fn new(
        fetcher: Arc<dyn HttpFetcher>,
        domains: Arc<dyn DomainMapping>,
        settings: &SiteSettings,
        keywords: &[String],
        user_agent: &str,
    ) -> Self {
        let mut keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            keywords = DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect();
        }

        Self {
            sitemap: SitemapDiscovery::new(fetcher.clone()),
            fetcher,
            domains,
            keywords,
            max_pages: settings.max_pages,
            pool_size: settings.pool_size.max(1),
            page_timeout: settings.page_timeout(),
            respect_robots: settings.respect_robots,
            robots_agent: product_token(user_agent).to_string(),
        }
    }

    pub fn source_name(&self) -> &'static str {
        SOURCE_SITEMAP
    }

    /// 抽取官网候选链接，域名未知或任何失败都返回空列表
    pub async fn extract(&self, company_name: &str) -> Vec<Link> {
        match self.try_extract(company_name).await {
            Ok(links) => links,
            Err(e) => {
                debug!(company = %company_name, "Site candidates yielded nothing: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_extract(&self, company_name: &str) -> Result<Vec<Link>, SourceError> {
        let domain = self.domains.resolve_domain(company_name).ok_or_else(|| {
            SourceError::NotConfigured(format!("no domain mapped for {}", company_name.trim()))
        })?;

        let index = self.sitemap.try_discover(&domain).await?;
        let mut candidates = filter_candidates(&index.urls, &self.keywords, usize::MAX);
        if self.respect_robots {
            let rules = RobotsRules::new(index.robots_txt.as_str(), self.robots_agent.as_str());
            candidates.retain(|url| rules.is_allowed(url));
        }
        candidates.truncate(self.max_pages);

        info!(
            company = %company_name,
            domain = %domain,
            sitemap_urls = index.urls.len(),
            candidates = candidates.len(),
            "Fetching site candidate pages"
        );
        Ok(self.fetch_pages(candidates).await)
    }

    /// 有界并发抓取候选页，等待全部任务完成或各自超时后按候选顺序合并
    async fn fetch_pages(&self, candidates: Vec<String>) -> Vec<Link> {
        let semaphore = Arc::new(Semaphore::new(self.pool_size));
        let mut handles = Vec::with_capacity(candidates.len());

        for url in candidates {
            let semaphore = semaphore.clone();
            let fetcher = self.fetcher.clone();
            let page_timeout = self.page_timeout;

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                let request = FetchRequest::get(&url).header("Accept", "text/html");
                match tokio::time::timeout(page_timeout, fetcher.fetch_text(&request)).await {
                    Ok(Ok(html)) => Some(page_links(&url, &html)),
                    Ok(Err(e)) => {
                        debug!(url = %url, "Candidate page fetch failed: {}", e);
                        None
                    }
                    Err(_) => {
                        debug!(url = %url, "Candidate page fetch timed out");
                        None
                    }
                }
            }));
        }

        let mut links = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(Some(page)) => links.extend(page),
                Ok(None) => {}
                Err(e) => warn!("Candidate page task aborted: {}", e),
            }
        }
        links
    }
}

/// 按关键词与通用招聘特征预筛 sitemap URL，保持原顺序，最多 `max` 条
///
/// 关键词同时匹配原始 URL 与百分号解码后的 URL，中文路径也能命中
pub fn filter_candidates(urls: &[String], keywords: &[String], max: usize) -> Vec<String> {
    urls.iter()
        .filter(|url| {
            let raw = url.to_lowercase();
            let decoded = urlencoding::decode(url)
                .map(|d| d.to_lowercase())
                .unwrap_or_else(|_| raw.clone());
            keywords
                .iter()
                .map(|k| k.to_lowercase())
                .chain(URL_HINTS.iter().map(|h| h.to_string()))
                .any(|needle| raw.contains(&needle) || decoded.contains(&needle))
        })
        .take(max)
        .cloned()
        .collect()
}

/// 单个候选页产生的链接：先结构化数据声明的入口，再页面本身
pub fn page_links(page_url: &str, html: &str) -> Vec<Link> {
    let base = Url::parse(page_url).ok();
    let mut links: Vec<Link> = extract_apply_urls(html)
        .into_iter()
        .filter_map(|u| match &base {
            Some(base) => resolve_url(base, &u).ok().map(|r| r.to_string()),
            None => Some(u),
        })
        .map(|u| Link::new(JSON_LD_TITLE, u, SOURCE_SITEMAP_JSONLD, "来源：官网结构化数据"))
        .collect();

    let title = page_title(html).unwrap_or_else(|| PAGE_TITLE_FALLBACK.to_string());
    links.push(Link::new(title, page_url, SOURCE_SITEMAP, "来源：官网 sitemap"));
    links
}
