// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::link::{Link, SOURCE_SUBMITTED};

/// 提交链接的类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkType {
    /// 投递入口
    Apply,
    /// 招聘公告
    Announcement,
}

/// 审核状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    /// 健康检查连续失败后由外部任务标记
    Expired,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Expired => "EXPIRED",
        }
    }
}

/// 新提交的链接
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub company_name: String,
    pub title: Option<String>,
    pub url: String,
    pub link_type: LinkType,
    /// 提交方：user/company/admin
    pub submitter: Option<String>,
    pub remarks: Option<String>,
}

/// 企业或用户提交的外部链接，审核通过后参与聚合
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedLink {
    pub id: Uuid,
    pub company_name: String,
    pub title: Option<String>,
    pub url: String,
    pub link_type: LinkType,
    pub submitter: Option<String>,
    pub status: SubmissionStatus,
    pub remarks: Option<String>,
    pub valid: bool,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubmittedLink {
    /// 以 PENDING 状态创建
    pub fn from_new(new: NewSubmission) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_name: new.company_name,
            title: new.title,
            url: new.url,
            link_type: new.link_type,
            submitter: new.submitter,
            status: SubmissionStatus::Pending,
            remarks: new.remarks,
            valid: true,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// 已审核通过且仍然有效
    pub fn is_live(&self) -> bool {
        self.status == SubmissionStatus::Approved && self.valid
    }

    /// 转换为聚合结果中的链接
    pub fn to_link(&self) -> Link {
        let default_title = match self.link_type {
            LinkType::Apply => "投递入口",
            LinkType::Announcement => "公告",
        };
        let title = self
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(default_title);
        let source = self
            .submitter
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(SOURCE_SUBMITTED);

        Link::collected_at(title, &self.url, source, "来源：提交审核", self.updated_at)
    }
}
