//! Mock implementations for testing the verification workflow engine

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::domain::value_objects::applicant_identity::{ApplicantIdentity, Gender};
use crate::errors::ProviderError;
use crate::services::verification::traits::IdentityProviderTrait;
use crate::services::verification::types::{OtpInitiation, OtpVerdict};

/// The OTP the mock provider accepts
pub const MOCK_OTP: &str = "123456";

/// A valid applicant identity for tests
pub fn identity() -> ApplicantIdentity {
    ApplicantIdentity {
        national_id: "123456789012".to_string(),
        full_name: "Asha Rao".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1992, 4, 17).unwrap(),
        gender: Gender::Female,
        mobile_number: "9876543210".to_string(),
        email: Some("asha@example.com".to_string()),
        address: "12 MG Road, Bengaluru".to_string(),
    }
}

/// Scripted identity provider for engine tests
///
/// Accepts `MOCK_OTP` and rejects everything else; behavior flags let tests
/// force transport failures and identity mismatches.
pub struct MockIdentityProvider {
    /// Whether an accepted OTP reports the identity as matched
    identity_matched: Mutex<bool>,
    /// Force initiate calls to fail with a transport error
    initiate_unavailable: Mutex<bool>,
    /// Force initiate calls to be rejected by the provider
    initiate_rejected: Mutex<bool>,
    /// Force verify calls to fail with a transport error
    verify_unavailable: Mutex<bool>,
    /// Number of initiate calls made
    pub initiate_calls: AtomicU32,
    /// Number of verify calls made
    pub verify_calls: AtomicU32,
    /// Last transaction id handed out
    last_transaction_id: Mutex<Option<String>>,
    txn_seq: AtomicU32,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            identity_matched: Mutex::new(true),
            initiate_unavailable: Mutex::new(false),
            initiate_rejected: Mutex::new(false),
            verify_unavailable: Mutex::new(false),
            initiate_calls: AtomicU32::new(0),
            verify_calls: AtomicU32::new(0),
            last_transaction_id: Mutex::new(None),
            txn_seq: AtomicU32::new(0),
        }
    }

    pub fn set_identity_matched(&self, matched: bool) {
        *self.identity_matched.lock().unwrap() = matched;
    }

    pub fn set_initiate_unavailable(&self, unavailable: bool) {
        *self.initiate_unavailable.lock().unwrap() = unavailable;
    }

    pub fn set_initiate_rejected(&self, rejected: bool) {
        *self.initiate_rejected.lock().unwrap() = rejected;
    }

    pub fn set_verify_unavailable(&self, unavailable: bool) {
        *self.verify_unavailable.lock().unwrap() = unavailable;
    }

    pub fn last_transaction_id(&self) -> Option<String> {
        self.last_transaction_id.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    async fn initiate_otp(
        &self,
        _identity: &ApplicantIdentity,
    ) -> Result<OtpInitiation, ProviderError> {
        self.initiate_calls.fetch_add(1, Ordering::SeqCst);

        if *self.initiate_unavailable.lock().unwrap() {
            return Err(ProviderError::Unavailable {
                reason: "connection timed out".to_string(),
            });
        }
        if *self.initiate_rejected.lock().unwrap() {
            return Err(ProviderError::Rejected {
                reason: "identity unknown to authority".to_string(),
            });
        }

        let seq = self.txn_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let transaction_id = format!("mock-txn-{}", seq);
        *self.last_transaction_id.lock().unwrap() = Some(transaction_id.clone());

        Ok(OtpInitiation { transaction_id })
    }

    async fn verify_otp(
        &self,
        _transaction_id: &str,
        otp: &str,
        _identity: &ApplicantIdentity,
    ) -> Result<OtpVerdict, ProviderError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);

        if *self.verify_unavailable.lock().unwrap() {
            return Err(ProviderError::Unavailable {
                reason: "connection timed out".to_string(),
            });
        }

        if otp == MOCK_OTP {
            Ok(OtpVerdict {
                identity_matched: *self.identity_matched.lock().unwrap(),
            })
        } else {
            Err(ProviderError::Rejected {
                reason: "invalid OTP".to_string(),
            })
        }
    }
}
