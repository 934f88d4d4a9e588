// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use url::Url;

use crate::config::settings::DEFAULT_KEYWORDS;
use crate::domain::models::link::Link;
use crate::domain::search::SourceError;
use crate::engines::traits::{FetchRequest, HttpFetcher};
use crate::utils::url_utils::resolve_url;

/// 模板中的公司名占位符
pub const NAME_PLACEHOLDER: &str = "${name}";

const DEFAULT_TITLE: &str = "投递链接";

// Best-effort textual scan; tolerates unclosed tags elsewhere in the document.
// `href` must follow whitespace so `data-href` is never taken; values may be unquoted.
static ANCHOR_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<a\s(?:[^>]*?\s)?href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))[^>]*>(.*?)</a\s*>"#,
    )
    .ok()
});
static TAG_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").ok());

/// 通用模板数据源
///
/// 按配置的 URL 模板（如 `https://www.nowcoder.com/search?query=${name}`）
/// 拉取搜索页 HTML，并按关键词抽取 A 标签链接
#[derive(Clone)]
pub struct TemplateSource {
    template: String,
    source_name: String,
    keywords: Vec<String>,
    fetcher: Arc<dyn HttpFetcher>,
}

impl TemplateSource {
    /// 创建模板数据源，来源标识由模板主机名推断
    ///
    /// 关键词为空时使用默认关键词
    pub fn new(template: &str, keywords: &[String], fetcher: Arc<dyn HttpFetcher>) -> Self {
        let keywords: Vec<String> = if keywords.iter().all(|k| k.trim().is_empty()) {
            DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
        } else {
            keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        };

        Self {
            template: template.trim().to_string(),
            source_name: source_name_for(template),
            keywords,
            fetcher,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// 代入公司名后的搜索页地址
    pub fn search_url(&self, company_name: &str) -> String {
        self.template
            .replace(NAME_PLACEHOLDER, &urlencoding::encode(company_name.trim()))
    }

    /// 按公司名检索投递链接，任何失败都返回空列表
    pub async fn crawl_by_company_name(&self, company_name: &str, limit: usize) -> Vec<Link> {
        match self.try_crawl(company_name, limit).await {
            Ok(links) => links,
            Err(e) => {
                warn!(source = %self.source_name, "Template source failed: {}", e);
                Vec::new()
            }
        }
    }

    /// 与 [`crawl_by_company_name`](Self::crawl_by_company_name) 相同，但保留失败原因
    pub async fn try_crawl(&self, company_name: &str, limit: usize) -> Result<Vec<Link>, SourceError> {
        let url = self.search_url(company_name);
        let request = FetchRequest::get(&url).header("Accept", "text/html");
        let html = self.fetcher.fetch_text(&request).await?;

        let links = extract_links(&html, &url, &self.keywords, &self.source_name, limit);
        debug!(
            source = %self.source_name,
            company = %company_name,
            count = links.len(),
            "Template source extracted links"
        );
        Ok(links)
    }
}

/// 由模板 URL 推断来源标识：主机名，去掉 `www.` 前缀
pub fn source_name_for(template: &str) -> String {
    let probe = template.replace(NAME_PLACEHOLDER, "x");
    let host = Url::parse(probe.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| {
            let s = probe
                .trim()
                .trim_start_matches("https://")
                .trim_start_matches("http://");
            s.split(['/', '?']).next().unwrap_or(s).to_string()
        });
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

/// 从 HTML 中按关键词抽取 A 标签链接
///
/// 候选条件：`(文本 + " " + href)` 小写后包含任一关键词。
/// 相对地址按 `page_url` 解析为绝对地址；收集到 `limit` 条即停止。
pub fn extract_links(
    html: &str,
    page_url: &str,
    keywords: &[String],
    source_name: &str,
    limit: usize,
) -> Vec<Link> {
    let (Some(anchor_re), Some(tag_re)) = (ANCHOR_RE.as_ref(), TAG_RE.as_ref()) else {
        return Vec::new();
    };
    let base = Url::parse(page_url).ok();
    let limit = limit.max(1);
    let mut links = Vec::new();

    for caps in anchor_re.captures_iter(html) {
        if links.len() >= limit {
            break;
        }
        let Some(href_match) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) else {
            continue;
        };
        let raw_href = html_escape::decode_html_entities(href_match.as_str().trim()).to_string();
        if !is_followable(&raw_href) {
            continue;
        }

        let stripped = tag_re.replace_all(&caps[4], "");
        let text = html_escape::decode_html_entities(&stripped)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let haystack = format!("{} {}", text, raw_href).to_lowercase();
        if !keywords.iter().any(|k| haystack.contains(&k.to_lowercase())) {
            continue;
        }

        let href = match &base {
            Some(base) => match resolve_url(base, &raw_href) {
                Ok(u) => u.to_string(),
                Err(_) => continue,
            },
            None => raw_href,
        };

        let title = if text.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            text
        };
        links.push(Link::new(
            title,
            href,
            source_name,
            format!("来源：{}", source_name),
        ));
    }

    links
}

fn is_followable(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    !(href.is_empty()
        || href.starts_with('#')
        || lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:"))
}
