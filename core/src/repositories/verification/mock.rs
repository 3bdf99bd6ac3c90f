//! In-memory implementation of VerificationRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use ekyc_shared::types::Pagination;

use crate::domain::entities::verification_record::{VerificationRecord, VerificationStatus};
use crate::errors::DomainError;

use super::trait_::VerificationRepository;

/// In-memory verification repository for tests
///
/// Injected through the same contract as production stores; there is no
/// hidden global state.
pub struct MockVerificationRepository {
    records: Arc<RwLock<HashMap<Uuid, VerificationRecord>>>,
    fail_updates: bool,
}

impl MockVerificationRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_updates: false,
        }
    }

    /// Create a mock repository whose update calls fail with a database error
    pub fn failing_updates() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_updates: true,
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for MockVerificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRepository for MockVerificationRepository {
    async fn create(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError> {
        let mut records = self.records.write().await;

        if records
            .values()
            .any(|r| r.verification_id == record.verification_id)
        {
            return Err(DomainError::Database {
                message: format!("duplicate verification id {}", record.verification_id),
            });
        }

        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_verification_id(
        &self,
        verification_id: &str,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| r.verification_id == verification_id)
            .cloned())
    }

    async fn update(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError> {
        if self.fail_updates {
            return Err(DomainError::Database {
                message: "simulated update failure".to_string(),
            });
        }

        let mut records = self.records.write().await;

        if !records.contains_key(&record.id) {
            return Err(DomainError::NotFound {
                resource: format!("VerificationRecord {}", record.verification_id),
            });
        }

        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_by_status(
        &self,
        status: Option<VerificationStatus>,
        pagination: &Pagination,
    ) -> Result<(Vec<VerificationRecord>, u64), DomainError> {
        let records = self.records.read().await;

        let mut matching: Vec<VerificationRecord> = records
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();

        Ok((page, total))
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| r.created_at >= cutoff);
        Ok((before - records.len()) as u64)
    }
}
