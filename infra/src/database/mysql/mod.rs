//! MySQL implementations of core repository traits

mod verification_repository_impl;

pub use verification_repository_impl::MySqlVerificationRepository;
