// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

/// 中文法人后缀，较长的在前
const CJK_SUFFIXES: &[&str] = &["股份有限公司", "有限责任公司", "有限公司", "公司", "集团"];

/// 英文法人后缀（小写），要求前面有分隔符才剥离，避免误伤 "zinc" 之类的名字
const LATIN_SUFFIXES: &[&str] = &[
    "co., ltd.",
    "co., ltd",
    "co.,ltd.",
    "co.,ltd",
    "co. ltd.",
    "co ltd",
    "corporation",
    "limited",
    "corp.",
    "corp",
    "inc.",
    "inc",
    "ltd.",
    "ltd",
    "llc",
    "gmbh",
];

/// 公司键
///
/// 公司显示名的规范化形式：小写、去空白、去法人后缀。
/// 作为缓存键与域名映射键使用，是启发式规则而非严格的身份映射。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompanyKey(String);

impl CompanyKey {
    pub fn from_name(name: &str) -> Self {
        let mut key = name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        // "xx集团有限公司" needs two passes
        while let Some(rest) = strip_one_suffix(&key) {
            if rest.is_empty() {
                break;
            }
            key = rest;
        }

        CompanyKey(key.chars().filter(|c| !c.is_whitespace()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn strip_one_suffix(key: &str) -> Option<String> {
    let rest = CJK_SUFFIXES
        .iter()
        .find_map(|suffix| key.strip_suffix(suffix))
        .or_else(|| {
            LATIN_SUFFIXES.iter().find_map(|suffix| {
                key.strip_suffix(suffix)
                    .filter(|rest| rest.ends_with([' ', ',', '.']))
            })
        })?;

    Some(
        rest.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '，' | '、'))
            .to_string(),
    )
}

impl fmt::Display for CompanyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
