// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use hireradar::config::settings::Settings;
use hireradar::engines::reqwest_engine::ReqwestFetcher;
use hireradar::engines::traits::{FetchError, FetchRequest, FetchResponse, HttpFetcher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const USER_AGENT: &str = "HireRadar/1.0";

/// 真实 HTTP 客户端，超时较短以便测试快速失败
pub fn http_fetcher() -> Arc<dyn HttpFetcher> {
    Arc::new(ReqwestFetcher::new(USER_AGENT, Duration::from_secs(2), Duration::from_secs(2)).unwrap())
}

/// 记录调用次数的包装
pub struct CountingFetcher {
    inner: Arc<dyn HttpFetcher>,
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn new(inner: Arc<dyn HttpFetcher>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpFetcher for CountingFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(request).await
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// 记录同时在途请求峰值的包装
pub struct PeakFetcher {
    inner: Arc<dyn HttpFetcher>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl PeakFetcher {
    pub fn new(inner: Arc<dyn HttpFetcher>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpFetcher for PeakFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let result = self.inner.fetch(request).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn name(&self) -> &'static str {
        "peak"
    }
}

/// 模板与官网都指向本地 mock 服务的配置
pub fn settings_for(server_uri: &str, domain_company: &str) -> Settings {
    Settings::from_toml(&format!(
        r#"
        [links]
        templates = ["{uri}/search?q=${{name}}"]
        max_per_company = 8
        source_timeout_ms = 5000

        [site]
        max_pages = 5
        pool_size = 2
        page_timeout_ms = 2000
        respect_robots = true

        [domain_map]
        "{company}" = "{uri}"
        "#,
        uri = server_uri,
        company = domain_company,
    ))
    .unwrap()
}
