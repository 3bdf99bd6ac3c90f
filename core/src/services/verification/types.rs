//! Types for verification workflow results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::verification_record::{VerificationRecord, VerificationStatus};

use super::policy;

/// Successful OTP initiation at the provider
#[derive(Debug, Clone)]
pub struct OtpInitiation {
    /// Provider transaction id correlating the challenge
    pub transaction_id: String,
}

/// Successful OTP verification at the provider
#[derive(Debug, Clone)]
pub struct OtpVerdict {
    /// Whether the applicant data matched the provider's records
    pub identity_matched: bool,
}

/// Caller-facing projection of a verification record
///
/// This is the input contract of the response-projection collaborator.
/// Identity fields are masked; raw PII never leaves the core through this
/// type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationProjection {
    /// Caller-visible verification reference
    pub verification_id: String,

    /// Current workflow status
    pub status: VerificationStatus,

    /// Attempts consumed against the current challenge
    pub attempt_count: i32,

    /// Attempts remaining against the current challenge
    pub attempts_remaining: i32,

    /// Masked national id
    pub national_id_masked: String,

    /// Masked mobile number
    pub mobile_masked: String,

    /// Sanitized failure reason, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    /// When the verification was created
    pub created_at: DateTime<Utc>,

    /// When the verification was last updated
    pub updated_at: DateTime<Utc>,

    /// When the identity was verified, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl VerificationProjection {
    /// Build a projection from a record and the configured attempt limit
    pub fn from_record(record: &VerificationRecord, max_attempts: i32) -> Self {
        Self {
            verification_id: record.verification_id.clone(),
            status: record.status,
            attempt_count: record.attempt_count,
            attempts_remaining: policy::attempts_remaining(record.attempt_count, max_attempts),
            national_id_masked: record.identity.masked_national_id(),
            mobile_masked: record.identity.masked_mobile(),
            failure_reason: record.failure_reason.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            verified_at: record.verified_at,
        }
    }
}
