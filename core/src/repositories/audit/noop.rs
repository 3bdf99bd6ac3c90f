//! No-op implementation of AuditLogRepository for when audit persistence is
//! not needed

use async_trait::async_trait;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainError;

use super::AuditLogRepository;

/// No-op implementation of AuditLogRepository
///
/// Audit events are still emitted as tracing events by the audit service;
/// this implementation simply skips persistence.
pub struct NoOpAuditLogRepository;

impl NoOpAuditLogRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for NoOpAuditLogRepository {
    async fn create(&self, _entry: &AuditLog) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_by_verification_id(
        &self,
        _verification_id: &str,
        _limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError> {
        Ok(Vec::new())
    }
}
