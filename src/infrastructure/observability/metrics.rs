// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::net::SocketAddr;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;
use crate::domain::search::SourceOutcome;

pub const SOURCE_FETCH_TOTAL: &str = "hireradar_source_fetch_total";
pub const CACHE_LOOKUPS_TOTAL: &str = "hireradar_cache_lookups_total";
pub const LINKS_RETURNED_TOTAL: &str = "hireradar_links_returned_total";

/// 初始化指标系统
///
/// 未启用时不安装导出器，指标宏调用为空操作
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.listen_addr, e);
            return;
        }
    };

    // port already in use is not fatal
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}", e);
        return;
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
}

/// 注册指标说明
pub fn describe_metrics() {
    describe_counter!(
        SOURCE_FETCH_TOTAL,
        "Number of source invocations, labelled by source and outcome"
    );
    describe_counter!(
        CACHE_LOOKUPS_TOTAL,
        "Number of per-company cache lookups, labelled hit or miss"
    );
    describe_counter!(LINKS_RETURNED_TOTAL, "Number of links returned to callers");
}

pub fn record_source_outcome(source: &str, outcome: &SourceOutcome) {
    counter!(
        SOURCE_FETCH_TOTAL,
        "source" => source.to_string(),
        "outcome" => outcome.label()
    )
    .increment(1);
}

pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!(CACHE_LOOKUPS_TOTAL, "result" => result).increment(1);
}

pub fn record_links_returned(count: usize) {
    counter!(LINKS_RETURNED_TOTAL).increment(count as u64);
}
