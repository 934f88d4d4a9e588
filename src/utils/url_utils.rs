// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::form_urlencoded;
use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 规范化URL，仅用于去重时的相等比较
///
/// 规则按顺序执行：
/// 1. 协议与主机小写，缺省协议为 `https`
/// 2. 去掉路径末尾的 `/`（路径仅为 `/` 时保留）
/// 3. 查询参数逐对解码后按 `key=value` 排序，再重新编码
/// 4. 重新拼装为 `scheme://host<path>[?query]`
///
/// 解析失败时原样返回输入，永不失败。
pub fn normalize(url: &str) -> String {
    let trimmed = url.trim();
    let parsed = match Url::parse(trimmed) {
        Ok(u) => u,
        Err(ParseError::RelativeUrlWithoutBase) => {
            match Url::parse(&format!("https://{}", trimmed.trim_start_matches('/'))) {
                Ok(u) => u,
                Err(_) => return url.to_string(),
            }
        }
        Err(_) => return url.to_string(),
    };

    let host = match parsed.host_str() {
        Some(h) if !h.is_empty() => h.to_lowercase(),
        _ => return url.to_string(),
    };
    let scheme = parsed.scheme().to_lowercase();

    let mut path = parsed.path().to_string();
    // repeated stripping keeps normalize idempotent for paths like "/a//"
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    let mut out = format!("{}://{}{}", scheme, host, path);
    if let Some(query) = parsed.query().filter(|q| !q.is_empty()) {
        let canonical = canonical_query(query);
        if !canonical.is_empty() {
            out.push('?');
            out.push_str(&canonical);
        }
    }
    out
}

fn canonical_query(query: &str) -> String {
    let mut pairs: Vec<(String, String)> = query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            form_urlencoded::parse(segment.as_bytes())
                .next()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
        })
        .collect();

    pairs.sort_by(|a, b| format!("{}={}", a.0, a.1).cmp(&format!("{}={}", b.0, b.1)));

    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                form_urlencoded::byte_serialize(k.as_bytes()).collect::<String>(),
                form_urlencoded::byte_serialize(v.as_bytes()).collect::<String>()
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// 将站点域名规范化为绝对 origin（缺省 `https://`，去掉末尾 `/`）
pub fn to_origin(domain: &str) -> String {
    let d = domain.trim().trim_end_matches('/');
    let lower = d.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        d.to_string()
    } else {
        format!("https://{}", d)
    }
}
