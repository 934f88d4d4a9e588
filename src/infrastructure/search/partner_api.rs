// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::settings::{AuthMode, PartnerApiSettings};
use crate::domain::models::link::{Link, SOURCE_PARTNER_API, SOURCE_PARTNER_SEARCH};
use crate::domain::search::{SourceError, SourceOutcome};
use crate::engines::traits::{FetchRequest, HttpFetcher};
use crate::infrastructure::search::template::NAME_PLACEHOLDER;
use crate::utils::url_utils::to_origin;

const DEFAULT_JOB_TITLE: &str = "职位投递";
const JOB_ARRAY_KEYS: &[&str] = &["jobs", "data", "items"];
const TITLE_KEYS: &[&str] = &["title", "name", "jobTitle"];
const APPLY_URL_KEYS: &[&str] = &["applyUrl", "apply_url", "url", "jobUrl"];

/// 合作招聘平台适配器
///
/// 已配置时优先调用官方职位接口（OAuth2 或 API Key 两种鉴权）；
/// 未配置、调用失败或没有可用职位时，回退为一条平台搜索页链接。
#[derive(Clone)]
pub struct PartnerApiAdapter {
    settings: PartnerApiSettings,
    fetcher: Arc<dyn HttpFetcher>,
}

impl PartnerApiAdapter {
    pub fn new(settings: PartnerApiSettings, fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { settings, fetcher }
    }

    pub fn source_name(&self) -> &'static str {
        SOURCE_PARTNER_API
    }

    /// 是否满足调用官方接口的必要配置
    pub fn is_configured(&self) -> bool {
        let s = &self.settings;
        if !s.enabled || s.jobs_endpoint.trim().is_empty() {
            return false;
        }
        match s.auth_mode {
            AuthMode::ApiKey => !s.api_key.trim().is_empty(),
            AuthMode::Oauth2 => {
                !s.client_id.trim().is_empty() && !s.client_secret.trim().is_empty()
            }
        }
    }

    /// 按公司名检索投递链接，结果至少包含回退链接
    pub async fn search_by_company_name(&self, company_name: &str, limit: usize) -> Vec<Link> {
        self.search_with_outcome(company_name, limit).await.0
    }

    /// 同 [`search_by_company_name`](Self::search_by_company_name)，附带本次调用的诊断结果
    pub async fn search_with_outcome(
        &self,
        company_name: &str,
        limit: usize,
    ) -> (Vec<Link>, SourceOutcome) {
        let reason = match self.try_fetch_jobs(company_name, limit).await {
            Ok(links) if !links.is_empty() => {
                let count = links.len();
                return (links, SourceOutcome::Ok(count));
            }
            Ok(_) => "no usable jobs".to_string(),
            Err(e) => {
                if !matches!(e, SourceError::NotConfigured(_)) {
                    warn!(company = %company_name, "Partner API call failed: {}", e);
                }
                e.to_string()
            }
        };

        debug!(company = %company_name, reason = %reason, "Partner API falling back to search link");
        (
            vec![self.fallback_link(company_name)],
            SourceOutcome::Fallback(reason),
        )
    }

    /// 调用官方职位接口；任何一步失败都以错误返回，由调用方决定回退
    pub async fn try_fetch_jobs(
        &self,
        company_name: &str,
        limit: usize,
    ) -> Result<Vec<Link>, SourceError> {
        if !self.is_configured() {
            return Err(SourceError::NotConfigured(
                "partner api disabled or credentials missing".to_string(),
            ));
        }

        let authorization = match self.settings.auth_mode {
            AuthMode::ApiKey => basic_credential(&self.settings.api_key),
            AuthMode::Oauth2 => format!("Bearer {}", self.fetch_access_token().await?),
        };

        let url = self.endpoint_url(&self.settings.jobs_endpoint);
        let request = FetchRequest::get(&url)
            .header("Accept", "application/json")
            .header("Authorization", authorization);
        let body = self.fetcher.fetch_text(&request).await?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| SourceError::Malformed(e.to_string()))?;

        let links = parse_jobs(&payload, limit);
        debug!(company = %company_name, count = links.len(), "Partner API returned jobs");
        Ok(links)
    }

    /// 通过 Client Credentials 获取访问令牌
    pub async fn fetch_access_token(&self) -> Result<String, SourceError> {
        let url = self.endpoint_url(&self.settings.token_endpoint);
        let body = json!({
            "clientID": self.settings.client_id,
            "clientSecret": self.settings.client_secret,
            "grantType": "client_credentials",
        });
        let request = FetchRequest::post(&url, body.to_string())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");

        let text = self.fetcher.fetch_text(&request).await?;
        let payload: Value =
            serde_json::from_str(&text).map_err(|e| SourceError::Malformed(e.to_string()))?;

        payload
            .pointer("/data/accessToken")
            .and_then(value_as_text)
            .ok_or_else(|| SourceError::Malformed("missing data.accessToken".to_string()))
    }

    /// 平台搜索页回退链接
    pub fn fallback_link(&self, company_name: &str) -> Link {
        let name = company_name.trim();
        let url = self
            .settings
            .search_url_template
            .replace(NAME_PLACEHOLDER, &urlencoding::encode(name));
        Link::new(
            format!("Moka 搜索：{}", name),
            url,
            SOURCE_PARTNER_SEARCH,
            "来源：Moka 搜索",
        )
    }

    fn endpoint_url(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let origin = to_origin(&self.settings.domain);
        if path.starts_with('/') {
            format!("{}{}", origin, path)
        } else {
            format!("{}/{}", origin, path)
        }
    }
}

/// `key:` 形式的 Basic 凭证（密码为空）
pub fn basic_credential(api_key: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(format!("{}:", api_key.trim()));
    format!("Basic {}", encoded)
}

/// 将职位接口返回体规范化为链接
///
/// 职位数组取 `jobs` / `data` / `items` 中第一个非空数组；
/// 没有可用投递地址的条目被跳过，最多返回 `limit` 条。
pub fn parse_jobs(payload: &Value, limit: usize) -> Vec<Link> {
    let Some(jobs) = JOB_ARRAY_KEYS
        .iter()
        .filter_map(|k| payload.get(*k).and_then(Value::as_array))
        .find(|arr| !arr.is_empty())
    else {
        return Vec::new();
    };

    jobs.iter()
        .filter_map(|job| {
            let url = first_text(job, APPLY_URL_KEYS)?;
            let title = first_text(job, TITLE_KEYS).unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string());
            Some(Link::new(title, url, SOURCE_PARTNER_API, "来源：Moka 官方接口"))
        })
        .take(limit.max(1))
        .collect()
}

fn first_text(node: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| node.get(*k).and_then(value_as_text))
}

// numbers and booleans are accepted as their textual form
fn value_as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
