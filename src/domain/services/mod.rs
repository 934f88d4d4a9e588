// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 公司键（company_key）：公司名规范化，缓存与域名映射共用
/// - 聚合服务（link_service）：多数据源的投递链接聚合、去重、截断与缓存
pub mod company_key;
pub mod link_service;

pub use company_key::CompanyKey;
pub use link_service::{LinkAggregationService, SearchReport};
