//! MySQL implementation of the VerificationRepository trait.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE verification_records (
//!     id                      CHAR(36)     NOT NULL PRIMARY KEY,
//!     verification_id         VARCHAR(16)  NOT NULL UNIQUE,
//!     national_id             VARCHAR(12)  NOT NULL,
//!     full_name               VARCHAR(255) NOT NULL,
//!     date_of_birth           DATE         NOT NULL,
//!     gender                  VARCHAR(10)  NOT NULL,
//!     mobile_number           VARCHAR(10)  NOT NULL,
//!     email                   VARCHAR(255) NULL,
//!     address                 VARCHAR(512) NOT NULL,
//!     status                  VARCHAR(32)  NOT NULL,
//!     provider_transaction_id VARCHAR(64)  NULL,
//!     otp_issued_at           TIMESTAMP(6) NULL,
//!     otp_expires_at          TIMESTAMP(6) NULL,
//!     attempt_count           INT          NOT NULL DEFAULT 0,
//!     failure_reason          VARCHAR(255) NULL,
//!     created_at              TIMESTAMP(6) NOT NULL,
//!     updated_at              TIMESTAMP(6) NOT NULL,
//!     verified_at             TIMESTAMP(6) NULL,
//!     INDEX idx_verification_status (status),
//!     INDEX idx_verification_created_at (created_at)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ekyc_core::domain::entities::verification_record::{
    OtpChallenge, VerificationRecord, VerificationStatus,
};
use ekyc_core::domain::value_objects::applicant_identity::{ApplicantIdentity, Gender};
use ekyc_core::errors::DomainError;
use ekyc_core::repositories::verification::VerificationRepository;
use ekyc_shared::types::Pagination;

/// MySQL implementation of VerificationRepository
pub struct MySqlVerificationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    /// Create a new MySQL verification repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn db_err(context: &str, e: impl std::fmt::Display) -> DomainError {
        DomainError::Database {
            message: format!("{}: {}", context, e),
        }
    }

    /// Convert a database row to a VerificationRecord
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<VerificationRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| Self::db_err("failed to get id", e))?;
        let status_str: String = row
            .try_get("status")
            .map_err(|e| Self::db_err("failed to get status", e))?;
        let status = VerificationStatus::parse(&status_str)
            .ok_or_else(|| Self::db_err("unknown status value", &status_str))?;
        let gender_str: String = row
            .try_get("gender")
            .map_err(|e| Self::db_err("failed to get gender", e))?;
        let gender = Gender::parse(&gender_str)
            .ok_or_else(|| Self::db_err("unknown gender value", &gender_str))?;

        let provider_transaction_id: Option<String> = row
            .try_get("provider_transaction_id")
            .map_err(|e| Self::db_err("failed to get provider_transaction_id", e))?;
        let otp_issued_at: Option<DateTime<Utc>> = row
            .try_get("otp_issued_at")
            .map_err(|e| Self::db_err("failed to get otp_issued_at", e))?;
        let otp_expires_at: Option<DateTime<Utc>> = row
            .try_get("otp_expires_at")
            .map_err(|e| Self::db_err("failed to get otp_expires_at", e))?;

        let challenge = match (provider_transaction_id, otp_issued_at, otp_expires_at) {
            (Some(provider_transaction_id), Some(issued_at), Some(expires_at)) => {
                Some(OtpChallenge {
                    provider_transaction_id,
                    issued_at,
                    expires_at,
                })
            }
            _ => None,
        };

        Ok(VerificationRecord {
            id: Uuid::parse_str(&id).map_err(|e| Self::db_err("invalid UUID", e))?,
            verification_id: row
                .try_get("verification_id")
                .map_err(|e| Self::db_err("failed to get verification_id", e))?,
            identity: ApplicantIdentity {
                national_id: row
                    .try_get("national_id")
                    .map_err(|e| Self::db_err("failed to get national_id", e))?,
                full_name: row
                    .try_get("full_name")
                    .map_err(|e| Self::db_err("failed to get full_name", e))?,
                date_of_birth: row
                    .try_get::<NaiveDate, _>("date_of_birth")
                    .map_err(|e| Self::db_err("failed to get date_of_birth", e))?,
                gender,
                mobile_number: row
                    .try_get("mobile_number")
                    .map_err(|e| Self::db_err("failed to get mobile_number", e))?,
                email: row
                    .try_get("email")
                    .map_err(|e| Self::db_err("failed to get email", e))?,
                address: row
                    .try_get("address")
                    .map_err(|e| Self::db_err("failed to get address", e))?,
            },
            status,
            challenge,
            attempt_count: row
                .try_get("attempt_count")
                .map_err(|e| Self::db_err("failed to get attempt_count", e))?,
            failure_reason: row
                .try_get("failure_reason")
                .map_err(|e| Self::db_err("failed to get failure_reason", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| Self::db_err("failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| Self::db_err("failed to get updated_at", e))?,
            verified_at: row
                .try_get("verified_at")
                .map_err(|e| Self::db_err("failed to get verified_at", e))?,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, verification_id, national_id, full_name, date_of_birth,
           gender, mobile_number, email, address, status,
           provider_transaction_id, otp_issued_at, otp_expires_at,
           attempt_count, failure_reason, created_at, updated_at, verified_at
    FROM verification_records
"#;

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn create(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError> {
        let query = r#"
            INSERT INTO verification_records (
                id, verification_id, national_id, full_name, date_of_birth,
                gender, mobile_number, email, address, status,
                provider_transaction_id, otp_issued_at, otp_expires_at,
                attempt_count, failure_reason, created_at, updated_at, verified_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.verification_id)
            .bind(&record.identity.national_id)
            .bind(&record.identity.full_name)
            .bind(record.identity.date_of_birth)
            .bind(record.identity.gender.as_str())
            .bind(&record.identity.mobile_number)
            .bind(&record.identity.email)
            .bind(&record.identity.address)
            .bind(record.status.as_str())
            .bind(record.challenge.as_ref().map(|c| c.provider_transaction_id.clone()))
            .bind(record.challenge.as_ref().map(|c| c.issued_at))
            .bind(record.challenge.as_ref().map(|c| c.expires_at))
            .bind(record.attempt_count)
            .bind(&record.failure_reason)
            .bind(record.created_at)
            .bind(record.updated_at)
            .bind(record.verified_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_err("insert failed", e))?;

        Ok(record)
    }

    async fn find_by_verification_id(
        &self,
        verification_id: &str,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let query = format!("{} WHERE verification_id = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(verification_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::db_err("query failed", e))?;

        match row {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError> {
        let query = r#"
            UPDATE verification_records
            SET national_id = ?, full_name = ?, date_of_birth = ?, gender = ?,
                mobile_number = ?, email = ?, address = ?, status = ?,
                provider_transaction_id = ?, otp_issued_at = ?, otp_expires_at = ?,
                attempt_count = ?, failure_reason = ?, updated_at = ?, verified_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&record.identity.national_id)
            .bind(&record.identity.full_name)
            .bind(record.identity.date_of_birth)
            .bind(record.identity.gender.as_str())
            .bind(&record.identity.mobile_number)
            .bind(&record.identity.email)
            .bind(&record.identity.address)
            .bind(record.status.as_str())
            .bind(record.challenge.as_ref().map(|c| c.provider_transaction_id.clone()))
            .bind(record.challenge.as_ref().map(|c| c.issued_at))
            .bind(record.challenge.as_ref().map(|c| c.expires_at))
            .bind(record.attempt_count)
            .bind(&record.failure_reason)
            .bind(record.updated_at)
            .bind(record.verified_at)
            .bind(record.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_err("update failed", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("VerificationRecord {}", record.verification_id),
            });
        }

        Ok(record)
    }

    async fn list_by_status(
        &self,
        status: Option<VerificationStatus>,
        pagination: &Pagination,
    ) -> Result<(Vec<VerificationRecord>, u64), DomainError> {
        let (rows, total) = match status {
            Some(status) => {
                let query = format!(
                    "{} WHERE status = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    SELECT_COLUMNS
                );
                let rows = sqlx::query(&query)
                    .bind(status.as_str())
                    .bind(pagination.limit_i64())
                    .bind(pagination.offset_i64())
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| Self::db_err("query failed", e))?;

                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM verification_records WHERE status = ?",
                )
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| Self::db_err("count failed", e))?;

                (rows, total)
            }
            None => {
                let query = format!(
                    "{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
                    SELECT_COLUMNS
                );
                let rows = sqlx::query(&query)
                    .bind(pagination.limit_i64())
                    .bind(pagination.offset_i64())
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| Self::db_err("query failed", e))?;

                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM verification_records")
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| Self::db_err("count failed", e))?;

                (rows, total)
            }
        };

        let records = rows
            .iter()
            .map(Self::row_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((records, total as u64))
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM verification_records WHERE created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::db_err("delete failed", e))?;

        Ok(result.rows_affected())
    }
}
