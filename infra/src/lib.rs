//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the eKYC application,
//! following Clean Architecture principles. It provides concrete
//! implementations for the identity provider gateway and verification
//! record persistence.
//!
//! ## Architecture
//!
//! - **Database**: MySQL verification store using SQLx
//! - **Provider**: HTTP client for the external identity authority, plus a
//!   mock implementation for development and testing

use thiserror::Error;

pub mod database;
pub mod provider;

// Re-export core types for convenience
pub use ekyc_core::errors::{DomainError, DomainResult, ProviderError};

/// Errors raised while constructing or operating infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Provider gateway error: {0}")]
    Provider(String),
}
