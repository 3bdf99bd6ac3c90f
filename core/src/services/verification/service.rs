//! Verification workflow engine implementation

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use ekyc_shared::config::VerificationConfig;
use ekyc_shared::types::{PaginatedResponse, Pagination};
use ekyc_shared::utils::validation::Validate;

use crate::domain::entities::audit::AuditEventType;
use crate::domain::entities::verification_record::{VerificationRecord, VerificationStatus};
use crate::domain::value_objects::applicant_identity::ApplicantIdentity;
use crate::errors::{DomainError, DomainResult, ProviderError, WorkflowError};
use crate::repositories::audit::{AuditLogRepository, NoOpAuditLogRepository};
use crate::repositories::verification::VerificationRepository;
use crate::services::audit::AuditService;

use super::policy::{self, AttemptDenial};
use super::traits::IdentityProviderTrait;
use super::types::{OtpVerdict, VerificationProjection};

/// Verification workflow engine
///
/// Owns every status transition of a `VerificationRecord`. The provider
/// client and the record store are injected collaborators; the engine is the
/// only component that interprets provider outcomes into workflow state.
///
/// Operations against the same verification id are serialized with an
/// internal per-record lock, so a read-decide-write sequence is never
/// interleaved with another operation on the same record. Operations on
/// different records run in parallel. The provider call is the only long
/// suspension and runs under the client's bounded timeout, which also bounds
/// the lock hold time.
pub struct EkycService<P, R, A = NoOpAuditLogRepository>
where
    P: IdentityProviderTrait,
    R: VerificationRepository,
    A: AuditLogRepository + 'static,
{
    /// Identity provider client
    provider: Arc<P>,
    /// Verification record store
    repository: Arc<R>,
    /// Optional audit service for workflow events
    audit_service: Option<Arc<AuditService<A>>>,
    /// Workflow configuration
    config: VerificationConfig,
    /// Per-record locks keyed by verification id
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<P, R> EkycService<P, R, NoOpAuditLogRepository>
where
    P: IdentityProviderTrait,
    R: VerificationRepository,
{
    /// Create a new workflow engine without audit persistence
    pub fn new(provider: Arc<P>, repository: Arc<R>, config: VerificationConfig) -> Self {
        Self {
            provider,
            repository,
            audit_service: None,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }
}

impl<P, R, A> EkycService<P, R, A>
where
    P: IdentityProviderTrait,
    R: VerificationRepository,
    A: AuditLogRepository + 'static,
{
    /// Create a new workflow engine with audit logging
    pub fn with_audit(
        provider: Arc<P>,
        repository: Arc<R>,
        audit_service: Arc<AuditService<A>>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            provider,
            repository,
            audit_service: Some(audit_service),
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Submit a new verification request
    ///
    /// Validates the applicant identity (validation failures touch neither
    /// the store nor the provider), creates the record in `Initiated`, and
    /// asks the provider to send an OTP. On provider failure the record is
    /// persisted as `Failed` with a sanitized reason before the error is
    /// surfaced, so no record is ever left in an initiating limbo.
    pub async fn submit(&self, identity: ApplicantIdentity) -> DomainResult<VerificationRecord> {
        // Step 1: Validate before any side effect
        identity.validate()?;

        tracing::info!(
            event = "verification_submit",
            national_id = %identity.masked_national_id(),
            mobile = %identity.masked_mobile(),
            "Submitting new verification request"
        );

        // Step 2: Persist the record before the provider call
        let record = self
            .repository
            .create(VerificationRecord::new(identity))
            .await?;

        self.audit(
            AuditEventType::VerificationSubmitted,
            &record,
            None,
        )
        .await;

        // Step 3: Initiate the OTP challenge
        self.initiate_challenge(record, "submit").await
    }

    /// Verify an OTP for an existing verification
    ///
    /// The attempt is consumed even when the provider call fails in
    /// transport: this bounds the total number of external calls a single
    /// record can generate.
    pub async fn verify_otp(
        &self,
        verification_id: &str,
        otp: &str,
    ) -> DomainResult<VerificationRecord> {
        if otp.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "OTP cannot be empty".to_string(),
            });
        }

        let lock = self.record_lock(verification_id).await;
        let _guard = lock.lock().await;

        let mut record = self.load(verification_id).await?;

        // A frozen record answers with the terminal error, not invalid-state,
        // and never reaches the provider again.
        if record.status == VerificationStatus::MaxAttemptsExceeded {
            return Err(WorkflowError::MaxAttemptsExceeded.into());
        }

        if let Err(denial) = policy::can_attempt(&record, self.config.max_attempts, Utc::now()) {
            return self.deny_attempt(record, denial).await;
        }

        let challenge = record.challenge.clone().ok_or_else(|| DomainError::Internal {
            message: format!(
                "verification {} is awaiting OTP but has no live challenge",
                record.verification_id
            ),
        })?;

        // Consume the attempt before calling out
        record.record_attempt();

        self.audit(AuditEventType::OtpVerifyAttempt, &record, None).await;

        let outcome = self
            .provider
            .verify_otp(&challenge.provider_transaction_id, otp, &record.identity)
            .await;

        match outcome {
            Ok(OtpVerdict {
                identity_matched: true,
            }) => {
                record.mark_verified();
                let record = self.repository.update(record).await?;

                tracing::info!(
                    event = "otp_verified",
                    verification_id = %record.verification_id,
                    "Identity verified"
                );
                self.audit(AuditEventType::OtpVerified, &record, None).await;

                Ok(record)
            }
            Ok(OtpVerdict {
                identity_matched: false,
            }) => {
                record.mark_data_mismatch("KYC data mismatch with provider records");
                let record = self.repository.update(record).await?;

                tracing::warn!(
                    event = "kyc_data_mismatch",
                    verification_id = %record.verification_id,
                    "OTP accepted but identity data did not match"
                );
                self.audit(AuditEventType::KycDataMismatch, &record, None).await;

                Ok(record)
            }
            Err(ProviderError::Rejected { reason }) => {
                tracing::warn!(
                    event = "otp_rejected",
                    verification_id = %record.verification_id,
                    attempt_count = record.attempt_count,
                    provider_reason = %reason,
                    "Provider rejected the OTP"
                );

                if record.attempts_exhausted(self.config.max_attempts) {
                    record.mark_attempts_exhausted();
                    self.repository.update(record.clone()).await?;
                    self.audit(AuditEventType::MaxAttemptsExceeded, &record, None)
                        .await;
                    Err(WorkflowError::MaxAttemptsExceeded.into())
                } else {
                    record.mark_otp_rejected("OTP rejected by identity provider");
                    self.repository.update(record.clone()).await?;

                    let remaining =
                        record.remaining_attempts(self.config.max_attempts);
                    self.audit(AuditEventType::OtpRejected, &record, None).await;
                    Err(WorkflowError::OtpRejected {
                        remaining_attempts: remaining,
                    }
                    .into())
                }
            }
            Err(ProviderError::Unavailable { reason }) => {
                // Persist the consumed attempt; status stays as it was
                self.repository.update(record.clone()).await?;

                tracing::error!(
                    event = "provider_unavailable",
                    verification_id = %record.verification_id,
                    provider_reason = %reason,
                    "Provider call failed during OTP verification"
                );
                Err(WorkflowError::ProviderUnavailable.into())
            }
        }
    }

    /// Issue a fresh OTP challenge for an existing verification
    ///
    /// Replaces the provider transaction id and resets the attempt counter;
    /// the prior transaction id is never retried.
    pub async fn resend_otp(&self, verification_id: &str) -> DomainResult<VerificationRecord> {
        let lock = self.record_lock(verification_id).await;
        let _guard = lock.lock().await;

        let record = self.load(verification_id).await?;

        if !record.status.can_resend() {
            return Err(WorkflowError::InvalidState {
                operation: "resend_otp",
                status: record.status,
            }
            .into());
        }

        tracing::info!(
            event = "otp_resend",
            verification_id = %record.verification_id,
            "Resending OTP"
        );

        match self.provider.initiate_otp(&record.identity).await {
            Ok(initiation) => {
                let mut record = record;
                record.attach_challenge(initiation.transaction_id, self.config.otp_ttl_minutes);
                record.status = VerificationStatus::OtpResent;
                let record = self.repository.update(record).await?;

                self.audit(AuditEventType::OtpResent, &record, None).await;
                Ok(record)
            }
            Err(error) => self.fail_initiation(record, error, "resend").await,
        }
    }

    /// Cancel a verification
    ///
    /// Cancelling an already verified or already cancelled record is an
    /// invalid-state error, not a no-op, so callers can detect the
    /// distinction.
    pub async fn cancel_verification(
        &self,
        verification_id: &str,
    ) -> DomainResult<VerificationRecord> {
        let lock = self.record_lock(verification_id).await;
        let _guard = lock.lock().await;

        let mut record = self.load(verification_id).await?;

        if !record.status.can_cancel() {
            return Err(WorkflowError::InvalidState {
                operation: "cancel_verification",
                status: record.status,
            }
            .into());
        }

        record.mark_cancelled();
        let record = self.repository.update(record).await?;

        tracing::info!(
            event = "verification_cancelled",
            verification_id = %record.verification_id,
            "Verification cancelled"
        );
        self.audit(AuditEventType::VerificationCancelled, &record, None)
            .await;

        Ok(record)
    }

    /// Resubmit a verification with corrected applicant data
    ///
    /// Allowed only from `KycDataMismatch`, `Failed`, and
    /// `MaxAttemptsExceeded`. A wrong OTP with attempts remaining must use
    /// resend instead.
    pub async fn resubmit_verification(
        &self,
        verification_id: &str,
        identity: ApplicantIdentity,
    ) -> DomainResult<VerificationRecord> {
        let lock = self.record_lock(verification_id).await;
        let _guard = lock.lock().await;

        let mut record = self.load(verification_id).await?;

        if !record.status.can_resubmit() {
            return Err(WorkflowError::InvalidState {
                operation: "resubmit_verification",
                status: record.status,
            }
            .into());
        }

        // Validate before any write
        identity.validate()?;

        tracing::info!(
            event = "verification_resubmit",
            verification_id = %record.verification_id,
            national_id = %identity.masked_national_id(),
            "Resubmitting verification with updated data"
        );

        record.reset_for_resubmission(identity);
        let record = self.repository.update(record).await?;

        self.audit(AuditEventType::VerificationResubmitted, &record, None)
            .await;

        self.initiate_challenge(record, "resubmit").await
    }

    /// Fetch a verification record by its caller-visible id
    pub async fn get_verification(
        &self,
        verification_id: &str,
    ) -> DomainResult<VerificationRecord> {
        self.load(verification_id).await
    }

    /// List verifications, optionally filtered by status, newest first
    pub async fn list_verifications(
        &self,
        status: Option<VerificationStatus>,
        pagination: &Pagination,
    ) -> DomainResult<PaginatedResponse<VerificationProjection>> {
        let (records, total) = self.repository.list_by_status(status, pagination).await?;

        let projections = records
            .iter()
            .map(|r| VerificationProjection::from_record(r, self.config.max_attempts))
            .collect();

        Ok(PaginatedResponse::new(projections, pagination, total))
    }

    /// Build the caller-facing projection of a record
    pub fn project(&self, record: &VerificationRecord) -> VerificationProjection {
        VerificationProjection::from_record(record, self.config.max_attempts)
    }

    /// Delete records older than the configured retention window
    ///
    /// Age-based only; workflow state never influences deletion.
    pub async fn cleanup_expired_verifications(&self) -> DomainResult<u64> {
        let cutoff = Utc::now() - Duration::days(self.config.retention_days);
        let deleted = self.repository.delete_older_than(cutoff).await?;

        tracing::info!(
            event = "retention_sweep",
            cutoff = %cutoff,
            deleted = deleted,
            "Deleted aged-out verification records"
        );

        // Drop idle per-record locks; in-flight operations hold a clone and
        // keep theirs alive.
        let mut locks = self.locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);

        Ok(deleted)
    }

    /// Acquire the lock handle serializing operations for one record
    async fn record_lock(&self, verification_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(verification_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn load(&self, verification_id: &str) -> DomainResult<VerificationRecord> {
        self.repository
            .find_by_verification_id(verification_id)
            .await?
            .ok_or_else(|| {
                WorkflowError::VerificationNotFound {
                    verification_id: verification_id.to_string(),
                }
                .into()
            })
    }

    /// Call the provider to issue a challenge and attach it to the record
    ///
    /// Shared by submit, resubmit. On provider failure the record is marked
    /// `Failed` and persisted before the error is surfaced.
    async fn initiate_challenge(
        &self,
        record: VerificationRecord,
        operation: &'static str,
    ) -> DomainResult<VerificationRecord> {
        match self.provider.initiate_otp(&record.identity).await {
            Ok(initiation) => {
                let mut record = record;
                record.attach_challenge(initiation.transaction_id, self.config.otp_ttl_minutes);
                let record = self.repository.update(record).await?;

                tracing::info!(
                    event = "otp_initiated",
                    verification_id = %record.verification_id,
                    operation = operation,
                    "OTP challenge issued"
                );
                self.audit(AuditEventType::OtpInitiated, &record, None).await;

                Ok(record)
            }
            Err(error) => self.fail_initiation(record, error, operation).await,
        }
    }

    /// Record a failed OTP initiation and surface the matching error
    async fn fail_initiation(
        &self,
        mut record: VerificationRecord,
        error: ProviderError,
        operation: &'static str,
    ) -> DomainResult<VerificationRecord> {
        tracing::error!(
            event = "otp_initiation_failed",
            verification_id = %record.verification_id,
            operation = operation,
            error = %error,
            "OTP initiation failed"
        );

        let (reason, workflow_error) = match &error {
            ProviderError::Rejected { .. } => (
                "OTP initiation rejected by identity provider",
                WorkflowError::ProviderRejected,
            ),
            ProviderError::Unavailable { .. } => (
                "OTP initiation service error",
                WorkflowError::ProviderUnavailable,
            ),
        };

        record.mark_failed(reason);
        let record = self.repository.update(record).await?;
        self.audit(AuditEventType::OtpInitiationFailed, &record, Some(reason))
            .await;

        Err(workflow_error.into())
    }

    /// Translate a policy denial into the persisted state and caller error
    async fn deny_attempt(
        &self,
        mut record: VerificationRecord,
        denial: AttemptDenial,
    ) -> DomainResult<VerificationRecord> {
        match denial {
            AttemptDenial::NotAwaitingOtp(status) => Err(WorkflowError::InvalidState {
                operation: "verify_otp",
                status,
            }
            .into()),
            AttemptDenial::ChallengeExpired => {
                tracing::warn!(
                    event = "otp_expired",
                    verification_id = %record.verification_id,
                    "OTP challenge expired"
                );
                self.audit(AuditEventType::OtpExpired, &record, None).await;
                Err(WorkflowError::OtpExpired.into())
            }
            AttemptDenial::AttemptsExhausted => {
                // Reached when prior attempts were consumed without a
                // provider rejection (e.g. transport failures). The frozen
                // state is persisted exactly once, before any increment.
                record.mark_attempts_exhausted();
                self.repository.update(record.clone()).await?;

                tracing::warn!(
                    event = "max_attempts_exceeded",
                    verification_id = %record.verification_id,
                    "Maximum verification attempts exceeded"
                );
                self.audit(AuditEventType::MaxAttemptsExceeded, &record, None)
                    .await;
                Err(WorkflowError::MaxAttemptsExceeded.into())
            }
        }
    }

    async fn audit(
        &self,
        event_type: AuditEventType,
        record: &VerificationRecord,
        detail: Option<&str>,
    ) {
        if let Some(audit_service) = &self.audit_service {
            audit_service
                .record(
                    event_type,
                    &record.verification_id,
                    Some(&record.identity),
                    detail,
                )
                .await;
        }
    }
}
