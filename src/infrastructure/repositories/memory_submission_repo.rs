// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::domain::models::link::Link;
use crate::domain::models::submitted_link::{
    LinkType, NewSubmission, SubmissionStatus, SubmittedLink,
};
use crate::domain::repositories::submission_repository::{SubmissionQuery, SubmissionRepository};
use crate::domain::services::company_key::CompanyKey;
use crate::utils::errors::RepositoryError;

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    link: SubmittedLink,
}

/// 提交链接仓库的内存实现
///
/// 进程内有效，重启即丢失；公司按公司键匹配
#[derive(Debug, Default)]
pub struct InMemorySubmissionRepository {
    entries: DashMap<Uuid, Entry>,
    next_seq: AtomicU64,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn transition(
        &self,
        id: Uuid,
        to: SubmissionStatus,
        remarks: Option<String>,
    ) -> Result<SubmittedLink, RepositoryError> {
        let mut entry = self.entries.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        let link = &mut entry.link;
        if link.status == SubmissionStatus::Expired && to != SubmissionStatus::Expired {
            return Err(RepositoryError::InvalidState(format!(
                "{} is expired",
                id
            )));
        }

        link.status = to;
        if to == SubmissionStatus::Expired {
            link.valid = false;
        }
        if remarks.is_some() {
            link.remarks = remarks;
        }
        link.updated_at = Utc::now();

        info!(id = %id, status = to.as_str(), "Submission status changed");
        Ok(link.clone())
    }

    fn snapshot(&self, filter: impl Fn(&SubmittedLink) -> bool) -> Vec<SubmittedLink> {
        let mut matched: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| filter(&e.link))
            .map(|e| e.value().clone())
            .collect();
        matched.sort_by_key(|e| e.seq);
        matched.into_iter().map(|e| e.link).collect()
    }

    fn live_links(&self, company_name: &str, link_type: LinkType) -> Vec<Link> {
        let key = CompanyKey::from_name(company_name);
        if key.is_empty() {
            return Vec::new();
        }
        self.snapshot(|s| {
            s.is_live() && s.link_type == link_type && CompanyKey::from_name(&s.company_name) == key
        })
        .iter()
        .map(SubmittedLink::to_link)
        .collect()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn submit(&self, submission: NewSubmission) -> Result<SubmittedLink, RepositoryError> {
        if submission.company_name.trim().is_empty() {
            return Err(RepositoryError::InvalidParameter(
                "company_name is blank".to_string(),
            ));
        }
        let url = Url::parse(submission.url.trim())
            .map_err(|e| RepositoryError::InvalidParameter(format!("url: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RepositoryError::InvalidParameter(format!(
                "unsupported scheme: {}",
                url.scheme()
            )));
        }

        let link = SubmittedLink::from_new(submission);
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.entries.insert(
            link.id,
            Entry {
                seq,
                link: link.clone(),
            },
        );
        info!(id = %link.id, company = %link.company_name, "Submission received");
        Ok(link)
    }

    async fn approve(&self, id: Uuid, remarks: Option<String>) -> Result<SubmittedLink, RepositoryError> {
        self.transition(id, SubmissionStatus::Approved, remarks)
    }

    async fn reject(&self, id: Uuid, remarks: Option<String>) -> Result<SubmittedLink, RepositoryError> {
        self.transition(id, SubmissionStatus::Rejected, remarks)
    }

    async fn mark_expired(&self, id: Uuid) -> Result<SubmittedLink, RepositoryError> {
        self.transition(id, SubmissionStatus::Expired, None)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubmittedLink>, RepositoryError> {
        Ok(self.entries.get(&id).map(|e| e.link.clone()))
    }

    async fn list(&self, query: &SubmissionQuery) -> Result<Vec<SubmittedLink>, RepositoryError> {
        let key = query
            .company_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map(CompanyKey::from_name);

        Ok(self.snapshot(|s| {
            key.as_ref()
                .map_or(true, |k| CompanyKey::from_name(&s.company_name) == *k)
                && query.status.map_or(true, |st| s.status == st)
        }))
    }

    async fn list_approved_apply_links(&self, company_name: &str) -> Result<Vec<Link>, RepositoryError> {
        Ok(self.live_links(company_name, LinkType::Apply))
    }

    async fn list_approved_announcement_links(
        &self,
        company_name: &str,
    ) -> Result<Vec<Link>, RepositoryError> {
        Ok(self.live_links(company_name, LinkType::Announcement))
    }
}
