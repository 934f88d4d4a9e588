// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 非 2xx 状态码
    #[error("Unexpected status: {0}")]
    Status(u16),
    /// 响应体为空
    #[error("Empty body")]
    EmptyBody,
    /// 请求参数无效
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// 判断错误是否由超时导致
    pub fn is_timeout(&self) -> bool {
        match self {
            FetchError::Timeout => true,
            FetchError::RequestFailed(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// 目标URL
    pub url: String,
    /// 请求方法
    pub method: HttpMethod,
    /// 请求头
    pub headers: HashMap<String, String>,
    /// 请求体
    pub body: Option<String>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Post,
            headers: HashMap::new(),
            body: Some(body.into()),
        }
    }

    /// 追加请求头
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// HTTP 抓取能力
///
/// 所有数据源都通过该特质访问网络，测试中可替换为桩实现
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// 执行一次请求，任何状态码都视为成功返回
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;

    /// 执行请求并返回文本内容；非 2xx 与空响应体均视为错误
    async fn fetch_text(&self, request: &FetchRequest) -> Result<String, FetchError> {
        let response = self.fetch(request).await?;
        if !response.is_success() {
            return Err(FetchError::Status(response.status_code));
        }
        if response.body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }
        Ok(response.body)
    }

    /// 实现名称
    fn name(&self) -> &'static str;
}
