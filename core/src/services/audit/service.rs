//! Audit service implementation

use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::entities::audit::{AuditEventType, AuditLog};
use crate::domain::value_objects::applicant_identity::ApplicantIdentity;
use crate::repositories::audit::AuditLogRepository;

/// Hash a national id using SHA-256 for PII-safe correlation
///
/// The hash lets operators correlate audit entries for the same subject
/// without the raw number ever appearing in the audit trail.
pub fn hash_national_id(national_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(national_id.as_bytes());
    hex::encode(hasher.finalize())
}

/// Audit service for recording verification workflow events
///
/// The workflow engine hands this service structured fields only; masking
/// and hashing happen here, so raw PII never crosses the audit boundary.
/// Persistence failures are logged and swallowed: auditing must never fail
/// a verification operation.
pub struct AuditService<A: AuditLogRepository> {
    repository: Arc<A>,
}

impl<A: AuditLogRepository> AuditService<A> {
    /// Create a new audit service
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    /// Record a workflow event for a verification
    pub async fn record(
        &self,
        event_type: AuditEventType,
        verification_id: &str,
        identity: Option<&ApplicantIdentity>,
        detail: Option<&str>,
    ) {
        let mut entry = AuditLog::new(event_type).with_verification_id(verification_id);

        if let Some(identity) = identity {
            entry = entry.with_subject(
                identity.masked_national_id(),
                hash_national_id(&identity.national_id),
            );
        }
        if let Some(detail) = detail {
            entry = entry.with_detail(detail);
        }

        tracing::info!(
            event = "audit",
            audit_event = entry.event_type.as_str(),
            verification_id = verification_id,
            national_id = entry.national_id_masked.as_deref().unwrap_or("-"),
            detail = detail.unwrap_or("-"),
            "Audit event recorded"
        );

        if let Err(e) = self.repository.create(&entry).await {
            tracing::warn!(
                event = "audit_persist_failed",
                verification_id = verification_id,
                error = %e,
                "Failed to persist audit entry"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::applicant_identity::Gender;
    use crate::repositories::audit::MockAuditLogRepository;
    use chrono::NaiveDate;

    fn identity() -> ApplicantIdentity {
        ApplicantIdentity {
            national_id: "123456789012".to_string(),
            full_name: "Asha Rao".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1992, 4, 17).unwrap(),
            gender: Gender::Female,
            mobile_number: "9876543210".to_string(),
            email: None,
            address: "12 MG Road, Bengaluru".to_string(),
        }
    }

    #[test]
    fn test_hash_is_stable_and_hex() {
        let a = hash_national_id("123456789012");
        let b = hash_national_id("123456789012");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, hash_national_id("999999999999"));
    }

    #[tokio::test]
    async fn test_record_masks_subject() {
        let repository = Arc::new(MockAuditLogRepository::new());
        let service = AuditService::new(repository.clone());

        service
            .record(
                AuditEventType::OtpVerified,
                "EKYC-1A2B3C4D",
                Some(&identity()),
                Some("identity matched"),
            )
            .await;

        let entries = repository.entries().await;
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.national_id_masked.as_deref(), Some("********9012"));
        // Raw number never stored
        assert!(entry.national_id_hash.as_deref().unwrap() != "123456789012");
        assert_eq!(entry.verification_id.as_deref(), Some("EKYC-1A2B3C4D"));
    }
}
