// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据源模块
///
/// 各类投递链接数据源的实现：模板搜索页、合作平台接口、
/// 官网 sitemap 与页面内结构化数据，以及去重与装配
pub mod deduplicator;
pub mod factory;
pub mod json_ld;
pub mod link_source;
pub mod partner_api;
pub mod site_candidates;
pub mod sitemap;
pub mod template;

pub use factory::{build_service, build_sources};
pub use link_source::{LinkSource, SourceStage};
