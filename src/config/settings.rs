// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// 默认的搜索页模板，`${name}` 为公司名占位符
pub const DEFAULT_TEMPLATES: &[&str] = &[
    "https://www.nowcoder.com/search?query=${name}",
    "https://www.offershow.cn/search?keyword=${name}",
];

/// 默认的投递关键词
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "招聘", "投递", "职位", "校招", "社招", "apply", "career", "join",
];

/// 默认的预热公司列表
pub const DEFAULT_WARM_UP: &[&str] = &["腾讯", "阿里巴巴", "字节跳动", "美团"];

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP 抓取配置
    pub http: HttpSettings,
    /// 链接聚合配置
    pub links: LinkSettings,
    /// 合作招聘平台接口配置
    pub partner_api: PartnerApiSettings,
    /// 官网 sitemap 候选抽取配置
    pub site: SiteSettings,
    /// 公司名 -> 官网域名
    #[serde(default)]
    pub domain_map: HashMap<String, String>,
    /// 预热任务配置
    pub scheduler: SchedulerSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
    /// 日志配置
    pub telemetry: TelemetrySettings,
}

/// HTTP 抓取配置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 固定的 User-Agent
    pub user_agent: String,
    /// 连接超时（毫秒）
    pub connect_timeout_ms: u64,
    /// 读取超时（毫秒）
    pub read_timeout_ms: u64,
}

impl HttpSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// 链接聚合配置
#[derive(Debug, Clone, Deserialize)]
pub struct LinkSettings {
    /// 搜索页 URL 模板
    pub templates: Vec<String>,
    /// 匹配关键词
    pub keywords: Vec<String>,
    /// 每个公司返回的最大链接数
    pub max_per_company: usize,
    /// 单个主数据源的整体超时（毫秒）
    pub source_timeout_ms: u64,
}

impl LinkSettings {
    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }
}

/// 合作平台鉴权方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// OAuth2 Client Credentials
    #[serde(alias = "OAuth2", alias = "OAUTH2")]
    Oauth2,
    /// Basic Auth，用户名为 API Key，密码为空
    #[serde(alias = "apiKey", alias = "apikey", alias = "basic")]
    ApiKey,
}

/// 合作招聘平台接口配置
#[derive(Debug, Clone, Deserialize)]
pub struct PartnerApiSettings {
    pub enabled: bool,
    pub auth_mode: AuthMode,
    /// API 域名，可带协议，缺省 https
    pub domain: String,
    pub api_key: String,
    pub client_id: String,
    pub client_secret: String,
    /// 职位列表接口相对路径
    pub jobs_endpoint: String,
    /// OAuth2 令牌接口相对路径
    pub token_endpoint: String,
    /// 回退搜索页模板
    pub search_url_template: String,
}

/// 官网 sitemap 候选抽取配置
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// 每个公司最多抓取的候选页面数
    pub max_pages: usize,
    /// 并发抓取的工作者数量
    pub pool_size: usize,
    /// 单个页面抓取超时（毫秒）
    pub page_timeout_ms: u64,
    /// 是否遵守 robots.txt 的 Disallow 规则
    pub respect_robots: bool,
}

impl SiteSettings {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }
}

/// 预热任务配置
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSettings {
    pub company_names: Vec<String>,
}

/// 指标导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub listen_addr: String,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// EnvFilter 表达式
    pub filter: String,
    /// 是否输出 JSON 格式日志
    pub json: bool,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            filter: "info,hireradar=debug".to_string(),
            json: false,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        // HTTP
        .set_default("http.user_agent", "HireRadar/1.0")?
        .set_default("http.connect_timeout_ms", 5000)?
        .set_default("http.read_timeout_ms", 8000)?
        // Aggregation
        .set_default("links.templates", to_strings(DEFAULT_TEMPLATES))?
        .set_default("links.keywords", to_strings(DEFAULT_KEYWORDS))?
        .set_default("links.max_per_company", 8)?
        .set_default("links.source_timeout_ms", 20000)?
        // Partner API
        .set_default("partner_api.enabled", false)?
        .set_default("partner_api.auth_mode", "oauth2")?
        .set_default("partner_api.domain", "api.mokahr.com")?
        .set_default("partner_api.api_key", "")?
        .set_default("partner_api.client_id", "")?
        .set_default("partner_api.client_secret", "")?
        .set_default("partner_api.jobs_endpoint", "")?
        .set_default(
            "partner_api.token_endpoint",
            "/api-platform/v1/auth/oauth2/getToken",
        )?
        .set_default(
            "partner_api.search_url_template",
            "https://app.mokahr.com/search?keyword=${name}",
        )?
        // Site candidates
        .set_default("site.max_pages", 5)?
        .set_default("site.pool_size", 3)?
        .set_default("site.page_timeout_ms", 8000)?
        .set_default("site.respect_robots", true)?
        // Scheduler
        .set_default("scheduler.company_names", to_strings(DEFAULT_WARM_UP))?
        // Observability
        .set_default("metrics.enabled", false)?
        .set_default("metrics.listen_addr", "0.0.0.0:9000")?
        .set_default("telemetry.filter", "info,hireradar=debug")?
        .set_default("telemetry.json", false)
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 与 `HIRERADAR__` 前缀的环境变量
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("HIRERADAR")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("links.templates")
                    .with_list_parse_key("links.keywords")
                    .with_list_parse_key("scheduler.company_names"),
            );

        builder.build()?.try_deserialize()
    }

    /// 在内置默认值之上叠加一段 TOML 配置
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        with_defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http: HttpSettings {
                user_agent: "HireRadar/1.0".to_string(),
                connect_timeout_ms: 5000,
                read_timeout_ms: 8000,
            },
            links: LinkSettings {
                templates: to_strings(DEFAULT_TEMPLATES),
                keywords: to_strings(DEFAULT_KEYWORDS),
                max_per_company: 8,
                source_timeout_ms: 20000,
            },
            partner_api: PartnerApiSettings {
                enabled: false,
                auth_mode: AuthMode::Oauth2,
                domain: "api.mokahr.com".to_string(),
                api_key: String::new(),
                client_id: String::new(),
                client_secret: String::new(),
                jobs_endpoint: String::new(),
                token_endpoint: "/api-platform/v1/auth/oauth2/getToken".to_string(),
                search_url_template: "https://app.mokahr.com/search?keyword=${name}".to_string(),
            },
            site: SiteSettings {
                max_pages: 5,
                pool_size: 3,
                page_timeout_ms: 8000,
                respect_robots: true,
            },
            domain_map: HashMap::new(),
            scheduler: SchedulerSettings {
                company_names: to_strings(DEFAULT_WARM_UP),
            },
            metrics: MetricsSettings {
                enabled: false,
                listen_addr: "0.0.0.0:9000".to_string(),
            },
            telemetry: TelemetrySettings::default(),
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
