//! Domain-specific error types and error handling.

mod types;

pub use types::{ProviderError, WorkflowError};

use ekyc_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use ekyc_shared::utils::validation::ValidationErrors;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to workflow-specific error kinds
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Stable error code for the response-projection layer
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => error_codes::VALIDATION_ERROR,
            Self::NotFound { .. } => error_codes::NOT_FOUND,
            Self::Database { .. } => error_codes::DATABASE_ERROR,
            Self::Internal { .. } => error_codes::INTERNAL_ERROR,
            Self::Workflow(workflow) => match workflow {
                WorkflowError::VerificationNotFound { .. } => error_codes::NOT_FOUND,
                WorkflowError::InvalidState { .. } => error_codes::INVALID_STATE,
                WorkflowError::MaxAttemptsExceeded => error_codes::MAX_ATTEMPTS_EXCEEDED,
                WorkflowError::OtpExpired => error_codes::OTP_EXPIRED,
                WorkflowError::OtpRejected { .. } => error_codes::OTP_REJECTED,
                WorkflowError::ProviderRejected => error_codes::PROVIDER_REJECTED,
                WorkflowError::ProviderUnavailable => error_codes::PROVIDER_UNAVAILABLE,
            },
        }
    }

    /// Whether retrying the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Workflow(WorkflowError::ProviderUnavailable) | Self::Database { .. }
        )
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation {
            message: errors.summary(),
        }
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.to_string());
        match self {
            Self::Workflow(WorkflowError::OtpRejected { remaining_attempts }) => {
                response.add_detail("remaining_attempts", remaining_attempts)
            }
            Self::Workflow(WorkflowError::InvalidState { status, .. }) => {
                response.add_detail("status", status.as_str())
            }
            _ => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::verification_record::VerificationStatus;

    #[test]
    fn test_error_codes() {
        let err = DomainError::Workflow(WorkflowError::MaxAttemptsExceeded);
        assert_eq!(err.error_code(), "MAX_ATTEMPTS_EXCEEDED");

        let err = DomainError::Validation {
            message: "mobile_number: Invalid mobile number format".to_string(),
        };
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(DomainError::Workflow(WorkflowError::ProviderUnavailable).is_retryable());
        assert!(!DomainError::Workflow(WorkflowError::MaxAttemptsExceeded).is_retryable());
        assert!(!DomainError::Workflow(WorkflowError::OtpRejected {
            remaining_attempts: 1
        })
        .is_retryable());
    }

    #[test]
    fn test_otp_rejected_response_details() {
        let err = DomainError::Workflow(WorkflowError::OtpRejected {
            remaining_attempts: 2,
        });
        let response = err.to_error_response();
        assert_eq!(response.error, "OTP_REJECTED");
        assert_eq!(
            response.details.unwrap()["remaining_attempts"],
            serde_json::json!(2)
        );
    }

    #[test]
    fn test_invalid_state_response_details() {
        let err = DomainError::Workflow(WorkflowError::InvalidState {
            operation: "verify_otp",
            status: VerificationStatus::Cancelled,
        });
        let response = err.to_error_response();
        assert_eq!(response.error, "INVALID_STATE");
        assert_eq!(response.details.unwrap()["status"], "CANCELLED");
        assert!(err.to_string().contains("verify_otp"));
    }
}
