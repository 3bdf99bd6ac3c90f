//! In-memory implementation of AuditLogRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainError;

use super::AuditLogRepository;

/// In-memory audit log repository for tests
pub struct MockAuditLogRepository {
    entries: Arc<RwLock<Vec<AuditLog>>>,
}

impl MockAuditLogRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// All recorded entries, in insertion order
    pub async fn entries(&self) -> Vec<AuditLog> {
        self.entries.read().await.clone()
    }
}

impl Default for MockAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn create(&self, entry: &AuditLog) -> Result<(), DomainError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn find_by_verification_id(
        &self,
        verification_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<AuditLog> = entries
            .iter()
            .filter(|e| e.verification_id.as_deref() == Some(verification_id))
            .cloned()
            .collect();
        matching.reverse();
        matching.truncate(limit);
        Ok(matching)
    }
}
