//! Mock identity provider for development and testing
//!
//! Keeps issued challenges in memory and verifies OTPs locally. A fixed
//! development OTP is always accepted so manual flows do not depend on
//! reading generated codes out of the logs.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use ekyc_core::domain::value_objects::applicant_identity::ApplicantIdentity;
use ekyc_core::errors::ProviderError;
use ekyc_core::services::verification::{IdentityProviderTrait, OtpInitiation, OtpVerdict};
use ekyc_shared::utils::masking::mask_otp;

/// OTP accepted for any challenge in development
pub const DEFAULT_OTP: &str = "123456";

/// Minutes a mock challenge stays verifiable
const OTP_VALIDITY_MINUTES: i64 = 10;

struct StoredChallenge {
    otp: String,
    issued_at: DateTime<Utc>,
}

/// Mock identity provider
///
/// Behavior knobs:
/// - `simulate_unavailable` makes every call fail in transport
/// - national ids added via [`add_mismatching_identity`](Self::add_mismatching_identity)
///   verify the OTP but report a KYC data mismatch
#[derive(Clone)]
pub struct MockIdentityProvider {
    challenges: Arc<RwLock<HashMap<String, StoredChallenge>>>,
    mismatching_ids: Arc<RwLock<HashSet<String>>>,
    simulate_unavailable: Arc<RwLock<bool>>,
    /// Counter for challenges issued, for test assertions
    issued_count: Arc<AtomicU64>,
}

impl MockIdentityProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            challenges: Arc::new(RwLock::new(HashMap::new())),
            mismatching_ids: Arc::new(RwLock::new(HashSet::new())),
            simulate_unavailable: Arc::new(RwLock::new(false)),
            issued_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Make subsequent calls fail as transport errors
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.simulate_unavailable.write().await = unavailable;
    }

    /// Mark a national id as mismatching the authority's KYC records
    pub async fn add_mismatching_identity(&self, national_id: impl Into<String>) {
        self.mismatching_ids.write().await.insert(national_id.into());
    }

    /// Number of challenges issued so far
    pub fn issued_count(&self) -> u64 {
        self.issued_count.load(Ordering::SeqCst)
    }

    /// The OTP currently associated with a transaction, for tests
    pub async fn otp_for_transaction(&self, transaction_id: &str) -> Option<String> {
        self.challenges
            .read()
            .await
            .get(transaction_id)
            .map(|c| c.otp.clone())
    }

    fn generate_otp() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    fn generate_transaction_id() -> String {
        format!("MOCK-{}", Uuid::new_v4().simple())
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    async fn initiate_otp(
        &self,
        identity: &ApplicantIdentity,
    ) -> Result<OtpInitiation, ProviderError> {
        if *self.simulate_unavailable.read().await {
            return Err(ProviderError::Unavailable {
                reason: "simulated provider outage".to_string(),
            });
        }

        let transaction_id = Self::generate_transaction_id();
        let otp = Self::generate_otp();

        debug!(
            event = "mock_otp_generated",
            transaction_id = %transaction_id,
            otp = %mask_otp(&otp),
            "Generated mock OTP"
        );

        self.challenges.write().await.insert(
            transaction_id.clone(),
            StoredChallenge {
                otp,
                issued_at: Utc::now(),
            },
        );
        self.issued_count.fetch_add(1, Ordering::SeqCst);

        info!(
            event = "mock_otp_initiated",
            transaction_id = %transaction_id,
            mobile = %identity.masked_mobile(),
            "Mock OTP challenge issued"
        );

        Ok(OtpInitiation { transaction_id })
    }

    async fn verify_otp(
        &self,
        transaction_id: &str,
        otp: &str,
        identity: &ApplicantIdentity,
    ) -> Result<OtpVerdict, ProviderError> {
        if *self.simulate_unavailable.read().await {
            return Err(ProviderError::Unavailable {
                reason: "simulated provider outage".to_string(),
            });
        }

        let mut challenges = self.challenges.write().await;

        let (expected_otp, issued_at) = match challenges.get(transaction_id) {
            Some(challenge) => (challenge.otp.clone(), challenge.issued_at),
            None => {
                warn!(
                    event = "mock_unknown_transaction",
                    transaction_id = transaction_id,
                    "Verification against unknown transaction id"
                );
                return Err(ProviderError::Rejected {
                    reason: "invalid transaction id".to_string(),
                });
            }
        };

        if Utc::now() > issued_at + Duration::minutes(OTP_VALIDITY_MINUTES) {
            challenges.remove(transaction_id);
            return Err(ProviderError::Rejected {
                reason: "OTP has expired".to_string(),
            });
        }

        if expected_otp != otp && otp != DEFAULT_OTP {
            return Err(ProviderError::Rejected {
                reason: "invalid OTP".to_string(),
            });
        }

        // One-time use: a verified challenge cannot be replayed
        challenges.remove(transaction_id);

        let identity_matched = !self
            .mismatching_ids
            .read()
            .await
            .contains(&identity.national_id);

        info!(
            event = "mock_otp_verified",
            transaction_id = transaction_id,
            identity_matched = identity_matched,
            "Mock OTP verified"
        );

        Ok(OtpVerdict { identity_matched })
    }
}
