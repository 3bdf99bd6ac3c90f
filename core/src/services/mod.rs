//! Business services containing domain logic and use cases.

pub mod audit;
pub mod verification;

// Re-export commonly used types
pub use audit::AuditService;
pub use verification::{
    AttemptDenial, EkycService, IdentityProviderTrait, OtpInitiation, OtpVerdict,
    VerificationProjection,
};
