// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::link::Link;
use crate::domain::models::submitted_link::{NewSubmission, SubmissionStatus, SubmittedLink};
use crate::utils::errors::RepositoryError;

/// 提交链接查询条件
#[derive(Debug, Default, Clone)]
pub struct SubmissionQuery {
    /// 按公司键匹配的公司名
    pub company_name: Option<String>,
    pub status: Option<SubmissionStatus>,
}

/// 提交链接仓库特质
///
/// 聚合服务只消费读侧的两个 `list_approved_*` 方法；
/// 写侧由外部审核流程驱动
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// 新增一条待审核的提交
    async fn submit(&self, submission: NewSubmission) -> Result<SubmittedLink, RepositoryError>;
    /// 审核通过
    async fn approve(&self, id: Uuid, remarks: Option<String>) -> Result<SubmittedLink, RepositoryError>;
    /// 审核拒绝
    async fn reject(&self, id: Uuid, remarks: Option<String>) -> Result<SubmittedLink, RepositoryError>;
    /// 标记失效（健康检查失败）
    async fn mark_expired(&self, id: Uuid) -> Result<SubmittedLink, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmittedLink>, RepositoryError>;
    /// 按条件列出，提交时间升序
    async fn list(&self, query: &SubmissionQuery) -> Result<Vec<SubmittedLink>, RepositoryError>;
    /// 已通过且有效的投递入口
    async fn list_approved_apply_links(&self, company_name: &str) -> Result<Vec<Link>, RepositoryError>;
    /// 已通过且有效的招聘公告
    async fn list_approved_announcement_links(
        &self,
        company_name: &str,
    ) -> Result<Vec<Link>, RepositoryError>;
}
