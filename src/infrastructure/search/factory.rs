// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use tracing::info;

use crate::config::settings::Settings;
use crate::domain::repositories::domain_mapping::DomainMapping;
use crate::domain::repositories::submission_repository::SubmissionRepository;
use crate::domain::services::link_service::LinkAggregationService;
use crate::engines::traits::HttpFetcher;
use crate::infrastructure::repositories::StaticDomainMap;
use crate::infrastructure::search::link_source::LinkSource;
use crate::infrastructure::search::partner_api::PartnerApiAdapter;
use crate::infrastructure::search::site_candidates::SiteCandidateSource;
use crate::infrastructure::search::template::TemplateSource;

/// 按配置构建数据源列表
///
/// 顺序即优先级：合作平台 -> 各模板（配置顺序）-> 官网候选
pub fn build_sources(
    settings: &Settings,
    fetcher: Arc<dyn HttpFetcher>,
    domains: Arc<dyn DomainMapping>,
) -> Vec<LinkSource> {
    let mut sources = vec![LinkSource::PartnerApi(PartnerApiAdapter::new(
        settings.partner_api.clone(),
        fetcher.clone(),
    ))];

    sources.extend(
        settings
            .links
            .templates
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| {
                LinkSource::Template(TemplateSource::new(t, &settings.links.keywords, fetcher.clone()))
            }),
    );

    sources.push(LinkSource::SiteCandidates(SiteCandidateSource::new(
        fetcher,
        domains,
        &settings.site,
        &settings.links.keywords,
        &settings.http.user_agent,
    )));

    info!(
        sources = ?sources.iter().map(|s| s.name().to_string()).collect::<Vec<_>>(),
        "Link sources configured"
    );
    sources
}

/// 按配置构建聚合服务，域名映射取自 `domain_map`
pub fn build_service(
    settings: &Settings,
    fetcher: Arc<dyn HttpFetcher>,
    submissions: Option<Arc<dyn SubmissionRepository>>,
) -> LinkAggregationService {
    let domain_map = StaticDomainMap::new(&settings.domain_map);
    if domain_map.is_empty() {
        info!("No company domains configured, site candidates will be skipped");
    } else {
        info!(domains = domain_map.len(), "Company domain map loaded");
    }

    let domains: Arc<dyn DomainMapping> = Arc::new(domain_map);
    LinkAggregationService::new(
        build_sources(settings, fetcher, domains),
        submissions,
        settings.links.max_per_company,
        settings.links.source_timeout(),
    )
}
