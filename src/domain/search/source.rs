// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use thiserror::Error;

use crate::engines::traits::FetchError;

/// 数据源边界上的失败分类
///
/// 这些错误从不越过聚合服务返回给调用方，只进入诊断信息
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SourceError {
    #[error("Not configured: {0}")]
    NotConfigured(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("Empty response")]
    EmptyResponse,
    #[error("Malformed payload: {0}")]
    Malformed(String),
    #[error("Timeout")]
    Timeout,
}

impl From<FetchError> for SourceError {
    fn from(e: FetchError) -> Self {
        if e.is_timeout() {
            return SourceError::Timeout;
        }
        match e {
            FetchError::Status(code) => SourceError::Status(code),
            FetchError::EmptyBody => SourceError::EmptyResponse,
            other => SourceError::Network(other.to_string()),
        }
    }
}

/// 单个数据源一次调用的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// 成功，返回的链接数（可能为 0）
    Ok(usize),
    /// 主路径不可用，使用了回退结果
    Fallback(String),
    /// 未满足运行条件，未发起请求
    Skipped(String),
    /// 失败，贡献为空
    Failed(String),
    /// 超过整体超时
    TimedOut,
    /// 数据源内部 panic，已隔离
    Panicked,
}

impl SourceOutcome {
    /// 指标标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok(_) => "ok",
            Self::Fallback(_) => "fallback",
            Self::Skipped(_) => "skipped",
            Self::Failed(_) => "failed",
            Self::TimedOut => "timed_out",
            Self::Panicked => "panicked",
        }
    }

    pub fn from_error(e: &SourceError) -> Self {
        match e {
            SourceError::NotConfigured(reason) => Self::Skipped(reason.clone()),
            SourceError::Timeout => Self::TimedOut,
            other => Self::Failed(other.to_string()),
        }
    }
}

/// 诊断旁路：某个数据源在一次聚合中的状态
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceStatus {
    pub source: String,
    pub outcome: SourceOutcome,
}

impl SourceStatus {
    pub fn new(source: impl Into<String>, outcome: SourceOutcome) -> Self {
        Self {
            source: source.into(),
            outcome,
        }
    }
}
