//! Specific error types for the verification workflow and provider client.
//!
//! Expected, retryable outcomes (wrong OTP, exhausted attempts) are explicit
//! error kinds rather than panics; the panic path is reserved for bugs.

use thiserror::Error;

use crate::domain::entities::verification_record::VerificationStatus;

/// Errors produced by the verification workflow engine
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Verification not found: {verification_id}")]
    VerificationNotFound { verification_id: String },

    #[error("Operation '{operation}' is not allowed from status {status}")]
    InvalidState {
        operation: &'static str,
        status: VerificationStatus,
    },

    #[error("Maximum verification attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("OTP challenge has expired")]
    OtpExpired,

    #[error("Invalid OTP, {remaining_attempts} attempt(s) remaining")]
    OtpRejected { remaining_attempts: i32 },

    #[error("Identity provider rejected the request")]
    ProviderRejected,

    #[error("Identity provider is unavailable, the operation may be retried")]
    ProviderUnavailable,
}

/// Tri-state outcome of a provider client call (success is the `Ok` arm)
///
/// `Rejected` is a provider-side refusal that the client must not retry;
/// `Unavailable` is a transport or timeout failure that the workflow may
/// retry. The client itself never retries either: retries are a workflow
/// decision so the provider is not double-charged for OTP sends.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider rejected the request: {reason}")]
    Rejected { reason: String },

    #[error("provider call failed: {reason}")]
    Unavailable { reason: String },
}

impl ProviderError {
    /// Whether the workflow may retry the surrounding operation
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
