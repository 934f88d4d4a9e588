// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 公司名 -> 官网域名
pub trait DomainMapping: Send + Sync {
    /// 解析公司官网域名，未知公司返回 None
    fn resolve_domain(&self, company_name: &str) -> Option<String>;
}
