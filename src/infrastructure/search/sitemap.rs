// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};
use url::Url;

use crate::domain::search::SourceError;
use crate::engines::traits::{FetchRequest, HttpFetcher};
use crate::utils::url_utils::{resolve_url, to_origin};

/// 一次 sitemap 发现的完整结果
#[derive(Debug, Clone, Default)]
pub struct SitemapIndex {
    /// 站点 origin，如 `https://www.example.com`
    pub origin: String,
    /// robots.txt 原文，供后续的 Disallow 判断复用
    pub robots_txt: String,
    pub sitemap_url: String,
    pub urls: Vec<String>,
}

/// 官网 sitemap 发现
///
/// robots.txt -> 第一条 `Sitemap:` 声明 -> sitemap XML -> `<loc>` 列表
#[derive(Clone)]
pub struct SitemapDiscovery {
    fetcher: Arc<dyn HttpFetcher>,
}

impl SitemapDiscovery {
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { fetcher }
    }

    /// 抽取站点 sitemap 中声明的全部 URL，任何失败都返回空列表
    pub async fn extract_urls_from_sitemap(&self, domain: &str) -> Vec<String> {
        match self.try_discover(domain).await {
            Ok(index) => index.urls,
            Err(e) => {
                debug!(domain = %domain, "Sitemap discovery yielded nothing: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_discover(&self, domain: &str) -> Result<SitemapIndex, SourceError> {
        let origin = to_origin(domain);
        let robots_url = format!("{}/robots.txt", origin);
        let robots_txt = self
            .fetcher
            .fetch_text(&FetchRequest::get(&robots_url))
            .await?;

        let declared = find_sitemap_url(&robots_txt)
            .ok_or_else(|| SourceError::NotConfigured("robots.txt declares no sitemap".to_string()))?;
        let sitemap_url = absolutize(&origin, &declared)?;

        let xml = self
            .fetcher
            .fetch_text(&FetchRequest::get(&sitemap_url).header("Accept", "application/xml"))
            .await?;
        let urls = parse_sitemap_xml(&xml);

        debug!(
            domain = %domain,
            sitemap = %sitemap_url,
            count = urls.len(),
            "Parsed sitemap"
        );
        Ok(SitemapIndex {
            origin,
            robots_txt,
            sitemap_url,
            urls,
        })
    }
}

/// 返回 robots.txt 中第一条 `Sitemap:` 声明的值（不区分大小写）
pub fn find_sitemap_url(robots_txt: &str) -> Option<String> {
    robots_txt.lines().find_map(|line| {
        let line = line.trim();
        let head = line.get(..8)?;
        if !head.eq_ignore_ascii_case("sitemap:") {
            return None;
        }
        let value = line[8..].trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn absolutize(origin: &str, declared: &str) -> Result<String, SourceError> {
    if let Ok(url) = Url::parse(declared) {
        return Ok(url.to_string());
    }
    let base = Url::parse(&format!("{}/", origin))
        .map_err(|e| SourceError::Malformed(format!("{}: {}", origin, e)))?;
    resolve_url(&base, declared)
        .map(|u| u.to_string())
        .map_err(|e| SourceError::Malformed(format!("{}: {}", declared, e)))
}

/// 按文档顺序返回全部 `<loc>` 元素的文本
///
/// 兼容带命名空间前缀的元素、实体引用与 CDATA。XML 不合法时返回空列表。
pub fn parse_sitemap_xml(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut urls = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"loc" => {
                current = Some(String::new());
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"loc" => {
                if let Some(text) = current.take() {
                    let text = text.trim();
                    if !text.is_empty() {
                        urls.push(text.to_string());
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(buf) = current.as_mut() {
                    match e.decode() {
                        Ok(text) => buf.push_str(&text),
                        Err(err) => {
                            warn!("Invalid sitemap text at {}: {}", reader.buffer_position(), err);
                            return Vec::new();
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(buf) = current.as_mut() {
                    match e.resolve_char_ref() {
                        Ok(Some(ch)) => buf.push(ch),
                        Ok(None) => {
                            let name = String::from_utf8_lossy(&e);
                            match resolve_xml_entity(&name) {
                                Some(resolved) => buf.push_str(resolved),
                                None => return Vec::new(),
                            }
                        }
                        Err(_) => return Vec::new(),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("Malformed sitemap XML at {}: {}", reader.buffer_position(), e);
                return Vec::new();
            }
        }
    }

    urls
}
