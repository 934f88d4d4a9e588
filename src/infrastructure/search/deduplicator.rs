// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

use crate::domain::models::link::Link;
use crate::utils::url_utils::normalize;

/// 链接去重器
///
/// 以规范化 URL 作为相等判断，保留第一次出现的链接；
/// 输入顺序即优先级顺序
#[derive(Debug, Default)]
pub struct LinkDeduplicator {
    seen_urls: HashSet<String>,
    dropped: usize,
}

impl LinkDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 过滤重复链接
    pub fn deduplicate(&mut self, links: Vec<Link>) -> Vec<Link> {
        let mut unique = Vec::with_capacity(links.len());
        for link in links {
            if self.seen_urls.insert(normalize(&link.url)) {
                unique.push(link);
            } else {
                self.dropped += 1;
            }
        }
        unique
    }

    pub fn get_stats(&self) -> DeduplicationStats {
        DeduplicationStats {
            unique_count: self.seen_urls.len(),
            dropped_count: self.dropped,
        }
    }
}

/// 去重统计信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeduplicationStats {
    pub unique_count: usize,
    pub dropped_count: usize,
}
