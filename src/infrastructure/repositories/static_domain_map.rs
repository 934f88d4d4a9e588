// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;

use crate::domain::repositories::domain_mapping::DomainMapping;
use crate::domain::services::company_key::CompanyKey;

/// 配置驱动的静态域名表，按公司键查找
#[derive(Debug, Clone, Default)]
pub struct StaticDomainMap {
    domains: HashMap<CompanyKey, String>,
}

impl StaticDomainMap {
    pub fn new(table: &HashMap<String, String>) -> Self {
        let domains = table
            .iter()
            .filter(|(_, domain)| !domain.trim().is_empty())
            .map(|(name, domain)| (CompanyKey::from_name(name), domain.trim().to_string()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { domains }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl DomainMapping for StaticDomainMap {
    fn resolve_domain(&self, company_name: &str) -> Option<String> {
        self.domains.get(&CompanyKey::from_name(company_name)).cloned()
    }
}
