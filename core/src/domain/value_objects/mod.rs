//! Value objects used by domain entities.

pub mod applicant_identity;

pub use applicant_identity::{ApplicantIdentity, Gender};
