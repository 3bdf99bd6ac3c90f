//! Identity provider gateway configuration

use serde::{Deserialize, Serialize};

/// Default timeout for provider API calls in seconds
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Configuration for the external identity provider gateway
///
/// The gateway exposes OTP initiation and OTP verification endpoints.
/// Credentials and endpoint paths are deployment-specific and typically
/// loaded from the environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Base URL of the provider gateway
    pub base_url: String,

    /// Path of the OTP initiation endpoint
    pub otp_initiate_path: String,

    /// Path of the OTP verification endpoint
    pub otp_verify_path: String,

    /// Timeout for provider API requests in seconds
    pub timeout_seconds: u64,

    /// Provider API version sent with every request
    pub api_version: String,

    /// License key issued by the provider
    pub license_key: String,

    /// Whether to use the mock provider (for development and tests)
    #[serde(default)]
    pub use_mock: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8082"),
            otp_initiate_path: String::from("/api/v1/otp/initiate"),
            otp_verify_path: String::from("/api/v1/otp/verify"),
            timeout_seconds: DEFAULT_PROVIDER_TIMEOUT_SECS,
            api_version: String::from("2.5"),
            license_key: String::new(),
            use_mock: false,
        }
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// Recognized variables: `PROVIDER_BASE_URL`, `PROVIDER_OTP_INITIATE_PATH`,
    /// `PROVIDER_OTP_VERIFY_PATH`, `PROVIDER_TIMEOUT_SECS`,
    /// `PROVIDER_API_VERSION`, `PROVIDER_LICENSE_KEY`, `PROVIDER_USE_MOCK`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("PROVIDER_BASE_URL").unwrap_or(defaults.base_url),
            otp_initiate_path: std::env::var("PROVIDER_OTP_INITIATE_PATH")
                .unwrap_or(defaults.otp_initiate_path),
            otp_verify_path: std::env::var("PROVIDER_OTP_VERIFY_PATH")
                .unwrap_or(defaults.otp_verify_path),
            timeout_seconds: std::env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
            api_version: std::env::var("PROVIDER_API_VERSION").unwrap_or(defaults.api_version),
            license_key: std::env::var("PROVIDER_LICENSE_KEY").unwrap_or_default(),
            use_mock: std::env::var("PROVIDER_USE_MOCK")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Full URL of the OTP initiation endpoint
    pub fn otp_initiate_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.otp_initiate_path)
    }

    /// Full URL of the OTP verification endpoint
    pub fn otp_verify_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.otp_verify_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = ProviderConfig {
            base_url: String::from("https://gateway.example.com/"),
            ..Default::default()
        };
        assert_eq!(
            config.otp_initiate_url(),
            "https://gateway.example.com/api/v1/otp/initiate"
        );
        assert_eq!(
            config.otp_verify_url(),
            "https://gateway.example.com/api/v1/otp/verify"
        );
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(ProviderConfig::default().timeout_seconds, 30);
    }
}
