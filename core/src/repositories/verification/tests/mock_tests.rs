//! Tests for the in-memory verification repository

use chrono::{Duration, NaiveDate, Utc};

use ekyc_shared::types::Pagination;

use crate::domain::entities::verification_record::{VerificationRecord, VerificationStatus};
use crate::domain::value_objects::applicant_identity::{ApplicantIdentity, Gender};
use crate::errors::DomainError;
use crate::repositories::verification::{MockVerificationRepository, VerificationRepository};

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

#[tokio::test]
async fn test_create_and_find() {
    let repo = MockVerificationRepository::new();
    let record = repo.create(VerificationRecord::new(identity())).await.unwrap();

    let found = repo
        .find_by_verification_id(&record.verification_id)
        .await
        .unwrap();
    assert_eq!(found.unwrap().id, record.id);

    let missing = repo.find_by_verification_id("EKYC-DEADBEEF").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_update_unknown_record_fails() {
    let repo = MockVerificationRepository::new();
    let record = VerificationRecord::new(identity());

    let result = repo.update(record).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_persists_state() {
    let repo = MockVerificationRepository::new();
    let mut record = repo.create(VerificationRecord::new(identity())).await.unwrap();

    record.mark_cancelled();
    repo.update(record.clone()).await.unwrap();

    let found = repo
        .find_by_verification_id(&record.verification_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.status, VerificationStatus::Cancelled);
}

#[tokio::test]
async fn test_list_by_status_filters_and_counts() {
    let repo = MockVerificationRepository::new();

    for _ in 0..3 {
        repo.create(VerificationRecord::new(identity())).await.unwrap();
    }
    let mut cancelled = repo.create(VerificationRecord::new(identity())).await.unwrap();
    cancelled.mark_cancelled();
    repo.update(cancelled).await.unwrap();

    let (initiated, total) = repo
        .list_by_status(Some(VerificationStatus::Initiated), &Pagination::new(1, 10))
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(initiated.len(), 3);

    let (all, total_all) = repo
        .list_by_status(None, &Pagination::new(1, 2))
        .await
        .unwrap();
    assert_eq!(total_all, 4);
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_delete_older_than() {
    let repo = MockVerificationRepository::new();

    let mut old = VerificationRecord::new(identity());
    old.created_at = Utc::now() - Duration::days(45);
    repo.create(old).await.unwrap();
    repo.create(VerificationRecord::new(identity())).await.unwrap();

    let deleted = repo
        .delete_older_than(Utc::now() - Duration::days(30))
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(repo.len().await, 1);
}
