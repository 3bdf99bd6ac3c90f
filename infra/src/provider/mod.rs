//! Identity provider gateway module
//!
//! This module provides implementations of the core
//! `IdentityProviderTrait`:
//!
//! - **HTTP gateway**: production client for the external identity
//!   authority, with bounded timeouts and tri-state outcome translation
//! - **Mock implementation**: in-memory challenges for development and
//!   testing

pub mod http;
pub mod mock;

pub use http::HttpIdentityProvider;
pub use mock::MockIdentityProvider;

use std::sync::Arc;

use ekyc_core::services::verification::IdentityProviderTrait;
use ekyc_shared::config::ProviderConfig;

use crate::InfrastructureError;

/// Create an identity provider based on configuration
///
/// Returns the mock implementation when `use_mock` is set, otherwise the
/// HTTP gateway client.
pub fn create_provider(
    config: &ProviderConfig,
) -> Result<Arc<dyn IdentityProviderTrait>, InfrastructureError> {
    if config.use_mock {
        tracing::warn!(
            event = "provider_mock_enabled",
            "Using mock identity provider; OTP challenges are not real"
        );
        Ok(Arc::new(MockIdentityProvider::new()))
    } else {
        Ok(Arc::new(HttpIdentityProvider::new(config.clone())?))
    }
}

#[cfg(test)]
mod tests;
