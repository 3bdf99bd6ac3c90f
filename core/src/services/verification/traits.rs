//! Trait for identity provider integration

use async_trait::async_trait;

use crate::domain::value_objects::applicant_identity::ApplicantIdentity;
use crate::errors::ProviderError;

use super::types::{OtpInitiation, OtpVerdict};

/// Trait for the external identity provider client
///
/// Both operations run under the client's bounded timeout and distinguish
/// three outcome classes: success (`Ok`), provider-rejected
/// (`ProviderError::Rejected`), and transport/timeout failure
/// (`ProviderError::Unavailable`). Implementations never retry and never
/// mutate local state; they only report provider outcomes for the workflow
/// engine to interpret.
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Ask the provider to send an OTP to the applicant's registered mobile
    ///
    /// Returns the provider transaction id correlating the new challenge.
    async fn initiate_otp(
        &self,
        identity: &ApplicantIdentity,
    ) -> Result<OtpInitiation, ProviderError>;

    /// Ask the provider to verify an OTP against a challenge
    ///
    /// An `Ok` verdict means the OTP was accepted; `identity_matched`
    /// reports whether the applicant data matched the provider's records.
    /// A wrong OTP surfaces as `ProviderError::Rejected`.
    async fn verify_otp(
        &self,
        transaction_id: &str,
        otp: &str,
        identity: &ApplicantIdentity,
    ) -> Result<OtpVerdict, ProviderError>;
}
