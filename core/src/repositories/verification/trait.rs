//! Verification record repository trait defining the persistence interface.
//!
//! This module defines the repository pattern interface for
//! `VerificationRecord` aggregates. The trait is async-first and uses Result
//! types for proper error handling. The workflow engine serializes
//! operations per verification id, so implementations only need to apply
//! each call atomically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ekyc_shared::types::Pagination;

use crate::domain::entities::verification_record::{VerificationRecord, VerificationStatus};
use crate::errors::DomainError;

/// Repository trait for VerificationRecord persistence operations
///
/// Implementations handle the actual storage operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
/// Records are only ever deleted by the age-based retention sweep, never by
/// workflow transitions.
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Persist a newly created verification record
    ///
    /// # Returns
    /// * `Ok(VerificationRecord)` - The created record
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate verification id)
    async fn create(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError>;

    /// Find a record by its caller-visible verification id
    ///
    /// # Returns
    /// * `Ok(Some(VerificationRecord))` - Record found
    /// * `Ok(None)` - No record with the given id
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_verification_id(
        &self,
        verification_id: &str,
    ) -> Result<Option<VerificationRecord>, DomainError>;

    /// Persist the new state of an existing record
    ///
    /// # Returns
    /// * `Ok(VerificationRecord)` - The updated record
    /// * `Err(DomainError)` - Record unknown or storage error
    async fn update(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError>;

    /// List records, optionally filtered by status, newest first
    ///
    /// Returns the requested page together with the total number of
    /// matching records.
    async fn list_by_status(
        &self,
        status: Option<VerificationStatus>,
        pagination: &Pagination,
    ) -> Result<(Vec<VerificationRecord>, u64), DomainError>;

    /// Delete records created before the cutoff, returning the count removed
    ///
    /// Used by the retention sweep only; workflow state never influences
    /// deletion.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
