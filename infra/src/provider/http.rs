//! HTTP client for the external identity provider gateway
//!
//! Wraps the authority's OTP initiation and verification endpoints. The
//! client applies a bounded per-request timeout and translates transport,
//! HTTP, and payload-level outcomes into the tri-state provider contract:
//! success, rejected, unavailable. It never retries; retries are a workflow
//! decision so the authority is not double-charged for OTP sends.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use ekyc_core::domain::value_objects::applicant_identity::ApplicantIdentity;
use ekyc_core::errors::ProviderError;
use ekyc_core::services::verification::{IdentityProviderTrait, OtpInitiation, OtpVerdict};
use ekyc_shared::config::ProviderConfig;

use crate::InfrastructureError;

/// Header carrying the provider API version
const HEADER_API_VERSION: &str = "X-API-Version";

/// Header carrying the provider license key
const HEADER_LICENSE_KEY: &str = "X-License-Key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpInitiateRequest<'a> {
    national_id: &'a str,
    mobile_number: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OtpInitiateResponse {
    success: bool,
    #[serde(default)]
    transaction_id: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpVerifyRequest<'a> {
    transaction_id: &'a str,
    otp: &'a str,
    national_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OtpVerifyResponse {
    success: bool,
    #[serde(default)]
    kyc_data_matched: bool,
    #[serde(default)]
    error_message: Option<String>,
}

/// Production identity provider client
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl HttpIdentityProvider {
    /// Create a new gateway client
    ///
    /// The timeout from the configuration applies to every request,
    /// covering connect, send, and response read.
    pub fn new(config: ProviderConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                InfrastructureError::Provider(format!("failed to build HTTP client: {}", e))
            })?;

        debug!(
            event = "provider_client_initialized",
            base_url = %config.base_url,
            timeout_seconds = config.timeout_seconds,
            "Identity provider client initialized"
        );

        Ok(Self { client, config })
    }

    /// Translate a reqwest error into the provider outcome contract
    fn transport_error(context: &str, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            error!(
                event = "provider_timeout",
                context = context,
                "Provider request timed out"
            );
            ProviderError::Unavailable {
                reason: format!("{} timed out", context),
            }
        } else {
            error!(
                event = "provider_transport_error",
                context = context,
                error = %error,
                "Provider request failed in transport"
            );
            ProviderError::Unavailable {
                reason: format!("{} transport failure", context),
            }
        }
    }

    /// Translate a non-success HTTP status into the provider outcome contract
    fn status_error(context: &str, status: reqwest::StatusCode) -> ProviderError {
        if status.is_client_error() {
            ProviderError::Rejected {
                reason: format!("{} rejected with HTTP {}", context, status.as_u16()),
            }
        } else {
            ProviderError::Unavailable {
                reason: format!("{} failed with HTTP {}", context, status.as_u16()),
            }
        }
    }
}

#[async_trait]
impl IdentityProviderTrait for HttpIdentityProvider {
    async fn initiate_otp(
        &self,
        identity: &ApplicantIdentity,
    ) -> Result<OtpInitiation, ProviderError> {
        debug!(
            event = "provider_otp_initiate",
            national_id = %identity.masked_national_id(),
            mobile = %identity.masked_mobile(),
            "Requesting OTP initiation"
        );

        let request = OtpInitiateRequest {
            national_id: &identity.national_id,
            mobile_number: &identity.mobile_number,
        };

        let response = self
            .client
            .post(self.config.otp_initiate_url())
            .header(HEADER_API_VERSION, self.config.api_version.as_str())
            .header(HEADER_LICENSE_KEY, self.config.license_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::transport_error("OTP initiation", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                event = "provider_otp_initiate_http_error",
                status = status.as_u16(),
                "OTP initiation returned non-success status"
            );
            return Err(Self::status_error("OTP initiation", status));
        }

        let body: OtpInitiateResponse = response.json().await.map_err(|e| {
            error!(
                event = "provider_malformed_response",
                context = "OTP initiation",
                error = %e,
                "Failed to decode provider response"
            );
            ProviderError::Unavailable {
                reason: "OTP initiation returned a malformed response".to_string(),
            }
        })?;

        if !body.success {
            return Err(ProviderError::Rejected {
                reason: body
                    .error_message
                    .unwrap_or_else(|| "OTP initiation rejected".to_string()),
            });
        }

        match body.transaction_id {
            Some(transaction_id) if !transaction_id.is_empty() => {
                Ok(OtpInitiation { transaction_id })
            }
            _ => Err(ProviderError::Unavailable {
                reason: "OTP initiation succeeded without a transaction id".to_string(),
            }),
        }
    }

    async fn verify_otp(
        &self,
        transaction_id: &str,
        otp: &str,
        identity: &ApplicantIdentity,
    ) -> Result<OtpVerdict, ProviderError> {
        debug!(
            event = "provider_otp_verify",
            national_id = %identity.masked_national_id(),
            transaction_id = transaction_id,
            "Requesting OTP verification"
        );

        let request = OtpVerifyRequest {
            transaction_id,
            otp,
            national_id: &identity.national_id,
        };

        let response = self
            .client
            .post(self.config.otp_verify_url())
            .header(HEADER_API_VERSION, self.config.api_version.as_str())
            .header(HEADER_LICENSE_KEY, self.config.license_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::transport_error("OTP verification", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                event = "provider_otp_verify_http_error",
                status = status.as_u16(),
                transaction_id = transaction_id,
                "OTP verification returned non-success status"
            );
            return Err(Self::status_error("OTP verification", status));
        }

        let body: OtpVerifyResponse = response.json().await.map_err(|e| {
            error!(
                event = "provider_malformed_response",
                context = "OTP verification",
                error = %e,
                "Failed to decode provider response"
            );
            ProviderError::Unavailable {
                reason: "OTP verification returned a malformed response".to_string(),
            }
        })?;

        if !body.success {
            return Err(ProviderError::Rejected {
                reason: body
                    .error_message
                    .unwrap_or_else(|| "OTP rejected".to_string()),
            });
        }

        Ok(OtpVerdict {
            identity_matched: body.kyc_data_matched,
        })
    }
}
