//! Tests for the mock identity provider

use chrono::NaiveDate;

use ekyc_core::domain::value_objects::applicant_identity::{ApplicantIdentity, Gender};
use ekyc_core::errors::ProviderError;
use ekyc_core::services::verification::IdentityProviderTrait;

use crate::provider::mock::{MockIdentityProvider, DEFAULT_OTP};

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
async fn test_initiate_issues_unique_transactions() {
    let provider = MockIdentityProvider::new();

    let first = provider.initiate_otp(&identity()).await.unwrap();
    let second = provider.initiate_otp(&identity()).await.unwrap();

    assert_ne!(first.transaction_id, second.transaction_id);
    assert!(first.transaction_id.starts_with("MOCK-"));
    assert_eq!(provider.issued_count(), 2);
}

#[tokio::test]
async fn test_verify_with_generated_otp() {
    let provider = MockIdentityProvider::new();
    let initiation = provider.initiate_otp(&identity()).await.unwrap();

    let otp = provider
        .otp_for_transaction(&initiation.transaction_id)
        .await
        .unwrap();
    assert_eq!(otp.len(), 6);

    let verdict = provider
        .verify_otp(&initiation.transaction_id, &otp, &identity())
        .await
        .unwrap();
    assert!(verdict.identity_matched);
}

#[tokio::test]
async fn test_verify_is_one_time_use() {
    let provider = MockIdentityProvider::new();
    let initiation = provider.initiate_otp(&identity()).await.unwrap();

    provider
        .verify_otp(&initiation.transaction_id, DEFAULT_OTP, &identity())
        .await
        .unwrap();

    // Replay against the consumed transaction is rejected
    let result = provider
        .verify_otp(&initiation.transaction_id, DEFAULT_OTP, &identity())
        .await;
    assert!(matches!(result, Err(ProviderError::Rejected { .. })));
}

#[tokio::test]
async fn test_wrong_otp_rejected() {
    let provider = MockIdentityProvider::new();
    let initiation = provider.initiate_otp(&identity()).await.unwrap();

    let result = provider
        .verify_otp(&initiation.transaction_id, "999999", &identity())
        .await;
    assert!(matches!(result, Err(ProviderError::Rejected { .. })));

    // Challenge survives a wrong OTP
    assert!(provider
        .otp_for_transaction(&initiation.transaction_id)
        .await
        .is_some());
}

#[tokio::test]
async fn test_unknown_transaction_rejected() {
    let provider = MockIdentityProvider::new();

    let result = provider
        .verify_otp("MOCK-nonexistent", DEFAULT_OTP, &identity())
        .await;
    assert!(matches!(result, Err(ProviderError::Rejected { .. })));
}

#[tokio::test]
async fn test_mismatching_identity_reported() {
    let provider = MockIdentityProvider::new();
    provider.add_mismatching_identity("123456789012").await;

    let initiation = provider.initiate_otp(&identity()).await.unwrap();
    let verdict = provider
        .verify_otp(&initiation.transaction_id, DEFAULT_OTP, &identity())
        .await
        .unwrap();

    assert!(!verdict.identity_matched);
}

#[tokio::test]
async fn test_simulated_outage() {
    let provider = MockIdentityProvider::new();
    provider.set_unavailable(true).await;

    let result = provider.initiate_otp(&identity()).await;
    assert!(matches!(result, Err(ProviderError::Unavailable { .. })));

    provider.set_unavailable(false).await;
    assert!(provider.initiate_otp(&identity()).await.is_ok());
}
