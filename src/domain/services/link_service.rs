// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use futures::FutureExt;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::models::link::{Link, SOURCE_SUBMITTED};
use crate::domain::repositories::submission_repository::SubmissionRepository;
use crate::domain::search::{SourceOutcome, SourceStatus};
use crate::domain::services::company_key::CompanyKey;
use crate::infrastructure::cache::LinkCache;
use crate::infrastructure::observability::metrics::{
    record_cache_lookup, record_links_returned, record_source_outcome,
};
use crate::infrastructure::search::deduplicator::LinkDeduplicator;
use crate::infrastructure::search::link_source::{LinkSource, SourceStage};

/// 一次聚合的完整结果
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub links: Vec<Link>,
    /// 按优先级顺序记录每个被考虑的数据源；缓存命中时为空
    pub statuses: Vec<SourceStatus>,
    pub from_cache: bool,
}

/// 投递链接聚合服务
///
/// 依次调用各数据源、合并人工审核通过的链接、按规范化 URL 去重、
/// 截断到每公司上限并写入缓存。单个数据源的任何失败都只会让它的
/// 贡献为空，不会影响其它数据源，也不会返回给调用方。
pub struct LinkAggregationService {
    sources: Vec<LinkSource>,
    submissions: Option<Arc<dyn SubmissionRepository>>,
    cache: Arc<LinkCache>,
    max_per_company: usize,
    source_timeout: Duration,
}

impl LinkAggregationService {
    /// 创建聚合服务
    ///
    /// # 参数
    ///
    /// * `sources` - 数据源，顺序即优先级
    /// * `submissions` - 人工提交链接仓库，可为空
    /// * `max_per_company` - 每个公司最多返回的链接数，至少为 1
    /// * `source_timeout` - 单个主数据源的整体超时
    pub fn new(
        sources: Vec<LinkSource>,
        submissions: Option<Arc<dyn SubmissionRepository>>,
        max_per_company: usize,
        source_timeout: Duration,
    ) -> Self {
        Self {
            sources,
            submissions,
            cache: Arc::new(LinkCache::new()),
            max_per_company: max_per_company.max(1),
            source_timeout,
        }
    }

    /// 使用外部持有的缓存
    pub fn with_cache(mut self, cache: Arc<LinkCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn max_per_company(&self) -> usize {
        self.max_per_company
    }

    pub fn sources(&self) -> &[LinkSource] {
        &self.sources
    }

    /// 按公司名检索投递链接
    pub async fn search_links(&self, company_name: &str) -> Vec<Link> {
        self.search_links_with_report(company_name).await.links
    }

    /// 同 [`search_links`](Self::search_links)，附带各数据源的诊断信息
    pub async fn search_links_with_report(&self, company_name: &str) -> SearchReport {
        let Some(key) = company_key(company_name) else {
            return SearchReport::default();
        };

        if let Some(cached) = self.cache.get(&key) {
            record_cache_lookup(true);
            let links = self.cap(cached);
            record_links_returned(links.len());
            debug!(company = %company_name, key = %key, count = links.len(), "Cache hit");
            return SearchReport {
                links,
                statuses: Vec::new(),
                from_cache: true,
            };
        }
        record_cache_lookup(false);

        let report = self.aggregate(company_name).await;
        self.cache.insert(key, report.links.clone());
        record_links_returned(report.links.len());
        report
    }

    /// 忽略缓存重新聚合，并整体覆盖缓存条目
    pub async fn refresh_links(&self, company_name: &str) -> Vec<Link> {
        let Some(key) = company_key(company_name) else {
            return Vec::new();
        };

        let report = self.aggregate(company_name).await;
        self.cache.insert(key, report.links.clone());
        report.links
    }

    /// 依次刷新一批公司，返回写入了非空结果的数量
    pub async fn warm_up<S: AsRef<str>>(&self, company_names: &[S]) -> usize {
        let mut warmed = 0;
        for name in company_names {
            let name: &str = name.as_ref();
            let links = self.refresh_links(name).await;
            if !links.is_empty() {
                warmed += 1;
            }
            info!(company = %name, count = links.len(), "Warmed up");
        }
        warmed
    }

    /// 删除某公司的缓存条目
    pub fn invalidate(&self, company_name: &str) -> bool {
        company_key(company_name)
            .map(|key| self.cache.invalidate(&key))
            .unwrap_or(false)
    }

    /// 已缓存的公司键
    pub fn cached_companies(&self) -> Vec<String> {
        self.cache.keys().into_iter().map(|k| k.to_string()).collect()
    }

    async fn aggregate(&self, company_name: &str) -> SearchReport {
        let limit = self.max_per_company;
        let mut merged = Vec::new();
        let mut statuses = Vec::new();

        // 主数据源并发执行，按配置顺序合并
        let primaries: Vec<&LinkSource> = self
            .sources
            .iter()
            .filter(|s| s.stage() == SourceStage::Primary)
            .collect();
        let results = join_all(
            primaries
                .iter()
                .map(|source| self.run_guarded(source, company_name, limit, true)),
        )
        .await;
        for (source, (links, outcome)) in primaries.iter().zip(results) {
            record_source_outcome(source.name(), &outcome);
            statuses.push(SourceStatus::new(source.name(), outcome));
            merged.extend(links);
        }

        if let Some(repo) = &self.submissions {
            let (links, outcome) = self.approved_links(repo.as_ref(), company_name).await;
            record_source_outcome(SOURCE_SUBMITTED, &outcome);
            statuses.push(SourceStatus::new(SOURCE_SUBMITTED, outcome));
            merged.extend(links);
        }

        for source in self.sources.iter().filter(|s| s.stage() == SourceStage::Augment) {
            let outcome = if merged.len() < limit {
                let (links, outcome) = self.run_guarded(source, company_name, limit, false).await;
                merged.extend(links);
                outcome
            } else {
                SourceOutcome::Skipped("cap already reached".to_string())
            };
            record_source_outcome(source.name(), &outcome);
            statuses.push(SourceStatus::new(source.name(), outcome));
        }

        let gathered = merged.len();
        let mut deduplicator = LinkDeduplicator::new();
        let links = self.cap(deduplicator.deduplicate(merged));

        info!(
            company = %company_name,
            gathered = gathered,
            duplicates = deduplicator.get_stats().dropped_count,
            returned = links.len(),
            "Aggregated links"
        );

        SearchReport {
            links,
            statuses,
            from_cache: false,
        }
    }

    /// 隔离单个数据源的 panic；主数据源另受整体超时约束，
    /// 超时的合作平台仍返回其搜索页兜底链接
    async fn run_guarded(
        &self,
        source: &LinkSource,
        company_name: &str,
        limit: usize,
        with_timeout: bool,
    ) -> (Vec<Link>, SourceOutcome) {
        let guarded = AssertUnwindSafe(source.fetch_with_status(company_name, limit)).catch_unwind();

        let result = if with_timeout {
            match tokio::time::timeout(self.source_timeout, guarded).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(source = %source.name(), company = %company_name, "Source timed out");
                    return match source.timeout_fallback(company_name) {
                        Some(link) => (vec![link], SourceOutcome::Fallback("timed out".to_string())),
                        None => (Vec::new(), SourceOutcome::TimedOut),
                    };
                }
            }
        } else {
            guarded.await
        };

        match result {
            Ok(output) => output,
            Err(_) => {
                warn!(source = %source.name(), company = %company_name, "Source panicked");
                (Vec::new(), SourceOutcome::Panicked)
            }
        }
    }

    async fn approved_links(
        &self,
        repo: &dyn SubmissionRepository,
        company_name: &str,
    ) -> (Vec<Link>, SourceOutcome) {
        let mut links = Vec::new();
        let mut errors = Vec::new();

        match repo.list_approved_apply_links(company_name).await {
            Ok(apply) => links.extend(apply),
            Err(e) => errors.push(e.to_string()),
        }
        match repo.list_approved_announcement_links(company_name).await {
            Ok(notices) => links.extend(notices),
            Err(e) => errors.push(e.to_string()),
        }

        if errors.is_empty() {
            let count = links.len();
            (links, SourceOutcome::Ok(count))
        } else {
            warn!(company = %company_name, "Submission lookup failed: {}", errors.join("; "));
            (links, SourceOutcome::Failed(errors.join("; ")))
        }
    }

    fn cap(&self, mut links: Vec<Link>) -> Vec<Link> {
        links.truncate(self.max_per_company);
        links
    }
}

fn company_key(company_name: &str) -> Option<CompanyKey> {
    if company_name.trim().is_empty() {
        return None;
    }
    let key = CompanyKey::from_name(company_name);
    (!key.is_empty()).then_some(key)
}

#[cfg(test)]
#[path = "link_service_test.rs"]
mod tests;
