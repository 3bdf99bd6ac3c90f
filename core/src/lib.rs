//! # eKYC Core
//!
//! Core business logic and domain layer for the eKYC backend.
//! This crate contains domain entities, the verification workflow engine,
//! repository interfaces, and error types that form the foundation of the
//! application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AuditEventType, AuditLog, OtpChallenge, VerificationRecord, VerificationStatus,
};
pub use domain::value_objects::{ApplicantIdentity, Gender};
pub use errors::{DomainError, DomainResult, ProviderError, WorkflowError};
pub use repositories::{
    AuditLogRepository, MockAuditLogRepository, MockVerificationRepository,
    NoOpAuditLogRepository, VerificationRepository,
};
pub use services::{
    AuditService, EkycService, IdentityProviderTrait, OtpInitiation, OtpVerdict,
    VerificationProjection,
};
