//! Verification record entity for the eKYC workflow.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::applicant_identity::ApplicantIdentity;

/// Prefix of caller-visible verification identifiers
pub const VERIFICATION_ID_PREFIX: &str = "EKYC-";

/// Status of a verification request as it moves through the workflow
///
/// `OtpVerificationFailed` is deliberately non-terminal: the applicant may
/// retry with the same challenge while attempts remain, or request a resend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    /// OTP challenge sent, no attempts used yet
    Initiated,
    /// A fresh challenge was issued after a resend request
    OtpResent,
    /// Last attempt presented a wrong OTP but attempts remain
    OtpVerificationFailed,
    /// Identity confirmed by the provider
    Verified,
    /// Provider-side failure unrelated to OTP correctness
    Failed,
    /// All allowed attempts consumed; terminal until resubmission
    MaxAttemptsExceeded,
    /// OTP accepted but identity data did not match provider records
    KycDataMismatch,
    /// Cancelled by the caller; terminal
    Cancelled,
}

impl VerificationStatus {
    /// String representation used for storage and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiated => "INITIATED",
            Self::OtpResent => "OTP_RESENT",
            Self::OtpVerificationFailed => "OTP_VERIFICATION_FAILED",
            Self::Verified => "VERIFIED",
            Self::Failed => "FAILED",
            Self::MaxAttemptsExceeded => "MAX_ATTEMPTS_EXCEEDED",
            Self::KycDataMismatch => "KYC_DATA_MISMATCH",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parse from the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "INITIATED" => Some(Self::Initiated),
            "OTP_RESENT" => Some(Self::OtpResent),
            "OTP_VERIFICATION_FAILED" => Some(Self::OtpVerificationFailed),
            "VERIFIED" => Some(Self::Verified),
            "FAILED" => Some(Self::Failed),
            "MAX_ATTEMPTS_EXCEEDED" => Some(Self::MaxAttemptsExceeded),
            "KYC_DATA_MISMATCH" => Some(Self::KycDataMismatch),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether an OTP may be verified from this status
    pub fn awaiting_otp(&self) -> bool {
        matches!(
            self,
            Self::Initiated | Self::OtpResent | Self::OtpVerificationFailed
        )
    }

    /// Whether a fresh OTP challenge may be requested from this status
    pub fn can_resend(&self) -> bool {
        matches!(
            self,
            Self::Initiated | Self::OtpVerificationFailed | Self::OtpResent
        )
    }

    /// Whether the verification may be resubmitted with corrected data
    ///
    /// A wrong OTP with attempts remaining is not eligible: the caller
    /// should resend instead of replacing the applicant data.
    pub fn can_resubmit(&self) -> bool {
        matches!(
            self,
            Self::KycDataMismatch | Self::Failed | Self::MaxAttemptsExceeded
        )
    }

    /// Whether the verification may be cancelled from this status
    pub fn can_cancel(&self) -> bool {
        !matches!(self, Self::Verified | Self::Cancelled)
    }

    /// Whether no further workflow transitions are possible without
    /// resubmission
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Verified
                | Self::Failed
                | Self::MaxAttemptsExceeded
                | Self::KycDataMismatch
                | Self::Cancelled
        )
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An OTP challenge issued by the identity provider
///
/// Exactly one challenge is live per record: issuing a new one replaces the
/// provider transaction id, and prior transaction ids are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Correlation id returned by the provider for this challenge
    pub provider_transaction_id: String,

    /// When the challenge was issued
    pub issued_at: DateTime<Utc>,

    /// When the challenge expires (always derived from `issued_at` + TTL)
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Issue a new challenge expiring `ttl_minutes` from now
    pub fn issue(provider_transaction_id: String, ttl_minutes: i64) -> Self {
        let issued_at = Utc::now();
        Self {
            provider_transaction_id,
            issued_at,
            expires_at: issued_at + Duration::minutes(ttl_minutes),
        }
    }
}

/// Aggregate root for a single eKYC verification request
///
/// The workflow engine exclusively owns status transitions; the store only
/// persists what the engine instructs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Internal unique identifier
    pub id: Uuid,

    /// Caller-visible verification reference, generated once, never reused
    pub verification_id: String,

    /// Applicant identity data; replaced only via resubmission
    pub identity: ApplicantIdentity,

    /// Current workflow status
    pub status: VerificationStatus,

    /// Live OTP challenge, if one has been issued
    pub challenge: Option<OtpChallenge>,

    /// OTP verification attempts consumed against the current challenge
    pub attempt_count: i32,

    /// Sanitized reason for the most recent failure, if any
    pub failure_reason: Option<String>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last mutation
    pub updated_at: DateTime<Utc>,

    /// Timestamp when the identity was verified, if it was
    pub verified_at: Option<DateTime<Utc>>,
}

impl VerificationRecord {
    /// Create a new record in `Initiated` status with no challenge yet
    pub fn new(identity: ApplicantIdentity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            verification_id: Self::generate_verification_id(),
            identity,
            status: VerificationStatus::Initiated,
            challenge: None,
            attempt_count: 0,
            failure_reason: None,
            created_at: now,
            updated_at: now,
            verified_at: None,
        }
    }

    /// Generate a caller-visible verification reference
    fn generate_verification_id() -> String {
        let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        format!("{}{}", VERIFICATION_ID_PREFIX, suffix)
    }

    /// Attach a freshly issued OTP challenge
    ///
    /// Replaces the provider transaction id and resets the attempt counter,
    /// which enforces the one-live-challenge invariant.
    pub fn attach_challenge(&mut self, provider_transaction_id: String, ttl_minutes: i64) {
        self.challenge = Some(OtpChallenge::issue(provider_transaction_id, ttl_minutes));
        self.attempt_count = 0;
        self.touch();
    }

    /// Consume one OTP verification attempt
    pub fn record_attempt(&mut self) {
        self.attempt_count += 1;
        self.touch();
    }

    /// Number of attempts remaining against the current challenge
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.attempt_count).max(0)
    }

    /// Whether all allowed attempts have been consumed
    pub fn attempts_exhausted(&self, max_attempts: i32) -> bool {
        self.attempt_count >= max_attempts
    }

    /// Mark the identity as verified
    pub fn mark_verified(&mut self) {
        self.status = VerificationStatus::Verified;
        self.verified_at = Some(Utc::now());
        self.failure_reason = None;
        self.touch();
    }

    /// Record a rejected OTP while attempts remain
    pub fn mark_otp_rejected(&mut self, reason: impl Into<String>) {
        self.status = VerificationStatus::OtpVerificationFailed;
        self.failure_reason = Some(reason.into());
        self.touch();
    }

    /// Freeze the record after the last allowed attempt
    pub fn mark_attempts_exhausted(&mut self) {
        self.status = VerificationStatus::MaxAttemptsExceeded;
        self.failure_reason = Some("Maximum verification attempts exceeded".to_string());
        self.touch();
    }

    /// Record an identity-data mismatch reported by the provider
    pub fn mark_data_mismatch(&mut self, reason: impl Into<String>) {
        self.status = VerificationStatus::KycDataMismatch;
        self.failure_reason = Some(reason.into());
        self.touch();
    }

    /// Record a provider-side failure
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status = VerificationStatus::Failed;
        self.failure_reason = Some(reason.into());
        self.touch();
    }

    /// Cancel the verification
    pub fn mark_cancelled(&mut self) {
        self.status = VerificationStatus::Cancelled;
        self.touch();
    }

    /// Reset the record for resubmission with corrected applicant data
    ///
    /// Clears the failure reason and the stale challenge; a new challenge is
    /// attached once OTP initiation succeeds.
    pub fn reset_for_resubmission(&mut self, identity: ApplicantIdentity) {
        self.identity = identity;
        self.status = VerificationStatus::Initiated;
        self.challenge = None;
        self.attempt_count = 0;
        self.failure_reason = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
