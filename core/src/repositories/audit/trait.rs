//! Audit log repository trait defining the interface for audit persistence.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditLog;
use crate::errors::DomainError;

/// Repository trait for AuditLog persistence operations
///
/// Implementations should write asynchronously and cheaply: audit
/// persistence must never slow down or fail a verification operation.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Persist a new audit log entry
    async fn create(&self, entry: &AuditLog) -> Result<(), DomainError>;

    /// Find audit entries for a verification, newest first
    ///
    /// # Arguments
    /// * `verification_id` - The verification reference to search for
    /// * `limit` - Maximum number of entries to return
    async fn find_by_verification_id(
        &self,
        verification_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLog>, DomainError>;
}
