// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use robotstxt::DefaultMatcher;

/// Robots.txt 规则检查
///
/// robots.txt 内容由 sitemap 发现阶段顺带取得，这里只做匹配，不再发请求。
/// 内容为空时视为全部允许。
#[derive(Debug, Clone)]
pub struct RobotsRules {
    content: String,
    user_agent: String,
}

impl RobotsRules {
    pub fn new(content: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            user_agent: user_agent.into(),
        }
    }

    /// 检查 URL 是否允许当前 User-Agent 抓取
    pub fn is_allowed(&self, url: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, &self.user_agent, url)
    }
}

/// `HireRadar/1.0` -> `HireRadar`，robots.txt 按产品标识匹配
pub fn product_token(user_agent: &str) -> &str {
    user_agent
        .split(['/', ' '])
        .find(|s| !s.is_empty())
        .unwrap_or(user_agent)
}
