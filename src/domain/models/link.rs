// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 合作平台官方接口
pub const SOURCE_PARTNER_API: &str = "moka";
/// 合作平台搜索页回退链接（低置信度）
pub const SOURCE_PARTNER_SEARCH: &str = "moka/search";
/// 官网 sitemap 候选页面（低置信度）
pub const SOURCE_SITEMAP: &str = "sitemap";
/// 官网页面内 JSON-LD 声明的投递入口
pub const SOURCE_SITEMAP_JSONLD: &str = "sitemap/jsonld";
/// 人工提交并审核通过
pub const SOURCE_SUBMITTED: &str = "submitted";

/// 投递/公告链接
///
/// 由某一次数据源调用产生，之后不再修改；展示用的 `url`
/// 保持发现时的原样，去重只使用其规范化形式。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub title: String,
    pub url: String,
    pub source: String,
    pub description: String,
    pub collected_at: DateTime<Utc>,
}

impl Link {
    /// 以当前时间为采集时间创建链接
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::collected_at(title, url, source, description, Utc::now())
    }

    pub fn collected_at(
        title: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
        description: impl Into<String>,
        collected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            description: description.into(),
            collected_at,
        }
    }
}
