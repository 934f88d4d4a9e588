// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashMap;

use crate::domain::models::link::Link;
use crate::domain::services::company_key::CompanyKey;

/// 按公司键缓存的链接列表
///
/// 没有过期与淘汰，条目只会被整体覆盖或显式失效；
/// 不同公司键之间的并发写互不阻塞
#[derive(Debug, Default)]
pub struct LinkCache {
    entries: DashMap<CompanyKey, Vec<Link>>,
}

impl LinkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取非空的缓存条目，空列表视为未命中
    pub fn get(&self, key: &CompanyKey) -> Option<Vec<Link>> {
        self.entries
            .get(key)
            .filter(|links| !links.is_empty())
            .map(|links| links.value().clone())
    }

    /// 整体覆盖条目
    pub fn insert(&self, key: CompanyKey, links: Vec<Link>) {
        self.entries.insert(key, links);
    }

    pub fn invalidate(&self, key: &CompanyKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn keys(&self) -> Vec<CompanyKey> {
        let mut keys: Vec<CompanyKey> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
