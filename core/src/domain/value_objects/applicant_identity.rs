//! Applicant identity value object.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ekyc_shared::utils::masking::{mask_mobile, mask_national_id};
use ekyc_shared::utils::validation::{validators, Validate, ValidationErrors};

/// Applicant gender as recorded by the identity authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// String representation used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Other => "OTHER",
        }
    }

    /// Parse from the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Identity data supplied by the applicant
///
/// Immutable once the verification reaches `Verified`; replaceable only
/// through resubmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantIdentity {
    /// National identity number (12 digits)
    pub national_id: String,

    /// Full legal name
    pub full_name: String,

    /// Date of birth
    pub date_of_birth: NaiveDate,

    /// Gender
    pub gender: Gender,

    /// Mobile number registered with the identity authority (10 digits)
    pub mobile_number: String,

    /// Optional email address
    pub email: Option<String>,

    /// Residential address
    pub address: String,
}

impl ApplicantIdentity {
    /// National id with all but the last 4 digits masked
    pub fn masked_national_id(&self) -> String {
        mask_national_id(&self.national_id)
    }

    /// Mobile number with the middle digits masked
    pub fn masked_mobile(&self) -> String {
        mask_mobile(&self.mobile_number)
    }
}

impl Validate for ApplicantIdentity {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !validators::is_valid_national_id(&self.national_id) {
            errors.add_error(
                "national_id",
                "Invalid national id format",
                "INVALID_FORMAT",
            );
        }

        if !validators::not_empty(&self.full_name) {
            errors.add_error("full_name", "Name cannot be empty", "REQUIRED_FIELD");
        }

        if !validators::is_valid_mobile(&self.mobile_number) {
            errors.add_error(
                "mobile_number",
                "Invalid mobile number format",
                "INVALID_FORMAT",
            );
        }

        // Email is optional; validate only when present and non-empty
        if let Some(email) = &self.email {
            if !email.is_empty() && !validators::is_valid_email(email) {
                errors.add_error("email", "Invalid email format", "INVALID_FORMAT");
            }
        }

        if !validators::not_empty(&self.address) {
            errors.add_error("address", "Address cannot be empty", "REQUIRED_FIELD");
        }

        if errors.has_errors() {
            Err(errors)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_identity() -> ApplicantIdentity {
        ApplicantIdentity {
            national_id: "123456789012".to_string(),
            full_name: "Asha Rao".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1992, 4, 17).unwrap(),
            gender: Gender::Female,
            mobile_number: "9876543210".to_string(),
            email: Some("asha@example.com".to_string()),
            address: "12 MG Road, Bengaluru".to_string(),
        }
    }

    #[test]
    fn test_valid_identity_passes() {
        assert!(valid_identity().validate().is_ok());
    }

    #[test]
    fn test_missing_email_is_allowed() {
        let mut identity = valid_identity();
        identity.email = None;
        assert!(identity.validate().is_ok());

        identity.email = Some(String::new());
        assert!(identity.validate().is_ok());
    }

    #[test]
    fn test_bad_national_id_rejected() {
        let mut identity = valid_identity();
        identity.national_id = "12345".to_string();

        let errors = identity.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].field, "national_id");
    }

    #[test]
    fn test_multiple_field_errors_collected() {
        let mut identity = valid_identity();
        identity.full_name = "  ".to_string();
        identity.mobile_number = "12".to_string();
        identity.email = Some("not-an-email".to_string());
        identity.address = String::new();

        let errors = identity.validate().unwrap_err();
        let by_field = errors.to_field_errors();
        assert!(by_field.contains_key("full_name"));
        assert!(by_field.contains_key("mobile_number"));
        assert!(by_field.contains_key("email"));
        assert!(by_field.contains_key("address"));
    }

    #[test]
    fn test_masked_accessors() {
        let identity = valid_identity();
        assert_eq!(identity.masked_national_id(), "********9012");
        assert_eq!(identity.masked_mobile(), "987****210");
    }
}
