//! Tests for identity provider implementations

mod mock_provider_tests;
