//! Audit log entity for recording verification workflow events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event types for verification workflow auditing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    // Submission events
    VerificationSubmitted,
    VerificationResubmitted,

    // OTP challenge events
    OtpInitiated,
    OtpInitiationFailed,
    OtpResent,

    // OTP verification events
    OtpVerifyAttempt,
    OtpVerified,
    OtpRejected,
    OtpExpired,
    MaxAttemptsExceeded,

    // Outcome events
    KycDataMismatch,
    VerificationCancelled,

    // Maintenance events
    RetentionSweep,
}

impl AuditEventType {
    /// Convert to string representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerificationSubmitted => "VERIFICATION_SUBMITTED",
            Self::VerificationResubmitted => "VERIFICATION_RESUBMITTED",
            Self::OtpInitiated => "OTP_INITIATED",
            Self::OtpInitiationFailed => "OTP_INITIATION_FAILED",
            Self::OtpResent => "OTP_RESENT",
            Self::OtpVerifyAttempt => "OTP_VERIFY_ATTEMPT",
            Self::OtpVerified => "OTP_VERIFIED",
            Self::OtpRejected => "OTP_REJECTED",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::MaxAttemptsExceeded => "MAX_ATTEMPTS_EXCEEDED",
            Self::KycDataMismatch => "KYC_DATA_MISMATCH",
            Self::VerificationCancelled => "VERIFICATION_CANCELLED",
            Self::RetentionSweep => "RETENTION_SWEEP",
        }
    }
}

/// An audit log entry for a verification workflow event
///
/// Entries carry masked and hashed identifiers only. Raw PII and OTP values
/// must never be placed in an audit entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditLog {
    /// Unique identifier for the log entry
    pub id: Uuid,

    /// Type of workflow event
    pub event_type: AuditEventType,

    /// Caller-visible verification reference, if the event concerns one
    pub verification_id: Option<String>,

    /// Masked national id (e.g. "********9012")
    pub national_id_masked: Option<String>,

    /// SHA-256 hash of the national id for correlation without exposure
    pub national_id_hash: Option<String>,

    /// Free-form sanitized detail
    pub detail: Option<String>,

    /// When the event occurred
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Create a new audit entry for an event type
    pub fn new(event_type: AuditEventType) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            verification_id: None,
            national_id_masked: None,
            national_id_hash: None,
            detail: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the verification reference
    pub fn with_verification_id(mut self, verification_id: impl Into<String>) -> Self {
        self.verification_id = Some(verification_id.into());
        self
    }

    /// Attach pre-masked and pre-hashed subject identifiers
    pub fn with_subject(mut self, national_id_masked: String, national_id_hash: String) -> Self {
        self.national_id_masked = Some(national_id_masked);
        self.national_id_hash = Some(national_id_hash);
        self
    }

    /// Attach a sanitized detail string
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
