// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;
use std::sync::Arc;

use hireradar::config::settings::{Settings, TelemetrySettings};
use hireradar::domain::repositories::submission_repository::SubmissionRepository;
use hireradar::domain::services::SearchReport;
use hireradar::engines::reqwest_engine::ReqwestFetcher;
use hireradar::engines::traits::HttpFetcher;
use hireradar::infrastructure::observability::metrics;
use hireradar::infrastructure::repositories::InMemorySubmissionRepository;
use hireradar::infrastructure::search::build_service;
use hireradar::utils::telemetry;
use tracing::{error, info};

/// 主函数
///
/// 对命令行给出的公司名（缺省为预热列表）执行一次聚合，以 JSON 输出结果
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            telemetry::init_telemetry(&TelemetrySettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(&settings.telemetry);
    metrics::init_metrics(&settings.metrics);
    info!("Starting hireradar...");

    // 3. Initialize components
    let fetcher: Arc<dyn HttpFetcher> = Arc::new(ReqwestFetcher::from_settings(&settings.http)?);
    let submissions: Arc<dyn SubmissionRepository> = Arc::new(InMemorySubmissionRepository::new());
    let service = build_service(&settings, fetcher, Some(submissions));

    let args: Vec<String> = std::env::args()
        .skip(1)
        .filter(|a| !a.trim().is_empty())
        .collect();
    let names = if args.is_empty() {
        settings.scheduler.company_names.clone()
    } else {
        args
    };

    // 4. Aggregate
    let mut reports: BTreeMap<String, SearchReport> = BTreeMap::new();
    for name in names {
        let report = service.search_links_with_report(&name).await;
        info!(company = %name, count = report.links.len(), "Search finished");
        reports.insert(name, report);
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
