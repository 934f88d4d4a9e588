// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

const LD_JSON_TYPE: &str = "application/ld+json";

static SCRIPT_SELECTOR: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("script[type]").ok());
static TITLE_SELECTOR: Lazy<Option<Selector>> = Lazy::new(|| Selector::parse("title").ok());

/// 从 HTML 中的 JSON-LD 块抽取投递相关链接
///
/// 对 `@type` 为 `JobPosting` 的对象收集 `url` 与 `applicationUrl`，
/// 对 `Organization` 收集 `url`。单个块解析失败只影响该块。
pub fn extract_apply_urls(html: &str) -> Vec<String> {
    let Some(selector) = SCRIPT_SELECTOR.as_ref() else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut urls = Vec::new();

    for script in document.select(selector) {
        let is_ld_json = script
            .value()
            .attr("type")
            .map(|t| t.trim().eq_ignore_ascii_case(LD_JSON_TYPE))
            .unwrap_or(false);
        if !is_ld_json {
            continue;
        }

        let body = script.text().collect::<String>();
        match serde_json::from_str::<Value>(body.trim()) {
            Ok(node) => collect_urls(&node, &mut urls),
            Err(e) => debug!("Skipping malformed JSON-LD block: {}", e),
        }
    }

    urls
}

/// 页面 `<title>` 文本（去首尾空白），不存在时返回 None
pub fn page_title(html: &str) -> Option<String> {
    let selector = TITLE_SELECTOR.as_ref()?;
    let document = Html::parse_document(html);
    document
        .select(selector)
        .next()
        .map(|t| t.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
}

fn collect_urls(node: &Value, urls: &mut Vec<String>) {
    match node {
        Value::Array(items) => {
            for item in items {
                collect_urls(item, urls);
            }
        }
        Value::Object(map) => {
            if has_type(map, "JobPosting") {
                push_text(map, "url", urls);
                push_text(map, "applicationUrl", urls);
            } else if has_type(map, "Organization") {
                push_text(map, "url", urls);
            }
            if let Some(graph) = map.get("@graph") {
                collect_urls(graph, urls);
            }
        }
        _ => {}
    }
}

// `@type` may be a plain string or an array of strings
fn has_type(map: &Map<String, Value>, wanted: &str) -> bool {
    match map.get("@type") {
        Some(Value::String(t)) => t.trim().eq_ignore_ascii_case(wanted),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.trim().eq_ignore_ascii_case(wanted)),
        _ => false,
    }
}

fn push_text(map: &Map<String, Value>, field: &str, urls: &mut Vec<String>) {
    if let Some(u) = map.get(field).and_then(Value::as_str) {
        let u = u.trim();
        if !u.is_empty() {
            urls.push(u.to_string());
        }
    }
}
