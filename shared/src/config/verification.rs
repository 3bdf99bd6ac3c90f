//! Verification workflow configuration

use serde::{Deserialize, Serialize};

/// Default maximum number of OTP verification attempts per challenge
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

/// Default OTP challenge time-to-live in minutes
pub const DEFAULT_OTP_TTL_MINUTES: i64 = 10;

/// Default retention window for verification records in days
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Configuration for the verification workflow engine
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Maximum number of OTP verification attempts per challenge
    pub max_attempts: i32,

    /// Number of minutes before an OTP challenge expires
    pub otp_ttl_minutes: i64,

    /// Number of days verification records are retained before cleanup
    pub retention_days: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            otp_ttl_minutes: DEFAULT_OTP_TTL_MINUTES,
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl VerificationConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// Recognized variables: `EKYC_MAX_ATTEMPTS`, `EKYC_OTP_TTL_MINUTES`,
    /// `EKYC_RETENTION_DAYS`.
    pub fn from_env() -> Self {
        Self {
            max_attempts: env_or("EKYC_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            otp_ttl_minutes: env_or("EKYC_OTP_TTL_MINUTES", DEFAULT_OTP_TTL_MINUTES),
            retention_days: env_or("EKYC_RETENTION_DAYS", DEFAULT_RETENTION_DAYS),
        }
    }

    /// Set the maximum attempt count
    pub fn with_max_attempts(mut self, max_attempts: i32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the OTP time-to-live in minutes
    pub fn with_otp_ttl_minutes(mut self, minutes: i64) -> Self {
        self.otp_ttl_minutes = minutes;
        self
    }

    /// Set the record retention window in days
    pub fn with_retention_days(mut self, days: i64) -> Self {
        self.retention_days = days;
        self
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.otp_ttl_minutes, 10);
        assert_eq!(config.retention_days, 30);
    }

    #[test]
    fn test_builders() {
        let config = VerificationConfig::default()
            .with_max_attempts(5)
            .with_otp_ttl_minutes(2)
            .with_retention_days(7);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.otp_ttl_minutes, 2);
        assert_eq!(config.retention_days, 7);
    }
}
