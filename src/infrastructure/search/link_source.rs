// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::warn;

use crate::domain::models::link::Link;
use crate::domain::search::{SourceError, SourceOutcome};
use crate::infrastructure::search::partner_api::PartnerApiAdapter;
use crate::infrastructure::search::site_candidates::SiteCandidateSource;
use crate::infrastructure::search::template::TemplateSource;

/// 数据源在一次聚合中的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStage {
    /// 每次聚合都会调用
    Primary,
    /// 仅当前面的结果不足上限时补充调用
    Augment,
}

/// 链接数据源
///
/// 封闭的数据源集合，每个变体持有自己的配置，对外只暴露
/// `fetch_with_status(company_name, limit)` 一个检索操作
#[derive(Clone)]
pub enum LinkSource {
    PartnerApi(PartnerApiAdapter),
    Template(TemplateSource),
    SiteCandidates(SiteCandidateSource),
}

impl LinkSource {
    /// 数据源标识
    pub fn name(&self) -> &str {
        match self {
            Self::PartnerApi(adapter) => adapter.source_name(),
            Self::Template(template) => template.source_name(),
            Self::SiteCandidates(site) => site.source_name(),
        }
    }

    pub fn stage(&self) -> SourceStage {
        match self {
            Self::PartnerApi(_) | Self::Template(_) => SourceStage::Primary,
            Self::SiteCandidates(_) => SourceStage::Augment,
        }
    }

    /// 整体超时后仍需给出的兜底链接，只有合作平台有
    pub fn timeout_fallback(&self, company_name: &str) -> Option<Link> {
        match self {
            Self::PartnerApi(adapter) => Some(adapter.fallback_link(company_name)),
            Self::Template(_) | Self::SiteCandidates(_) => None,
        }
    }

    /// 检索链接并给出本次调用的诊断结果
    pub async fn fetch_with_status(
        &self,
        company_name: &str,
        limit: usize,
    ) -> (Vec<Link>, SourceOutcome) {
        match self {
            Self::PartnerApi(adapter) => adapter.search_with_outcome(company_name, limit).await,
            Self::Template(template) => settle(
                template.try_crawl(company_name, limit).await,
                self.name(),
                company_name,
            ),
            Self::SiteCandidates(site) => settle(
                site.try_extract(company_name).await,
                self.name(),
                company_name,
            ),
        }
    }
}

fn settle(
    result: Result<Vec<Link>, SourceError>,
    source: &str,
    company_name: &str,
) -> (Vec<Link>, SourceOutcome) {
    match result {
        Ok(links) => {
            let count = links.len();
            (links, SourceOutcome::Ok(count))
        }
        Err(e) => {
            if !matches!(e, SourceError::NotConfigured(_)) {
                warn!(source = %source, company = %company_name, "Source failed: {}", e);
            }
            (Vec::new(), SourceOutcome::from_error(&e))
        }
    }
}
