//! PII masking helpers for logs and audit trails
//!
//! Identity fields must never appear unmasked in logs, audit entries, or
//! caller-facing projections. These helpers keep just enough of the value
//! for a human operator to correlate records.

/// Mask a national identity number, keeping only the last 4 digits
///
/// # Example
///
/// ```
/// use ekyc_shared::utils::masking::mask_national_id;
/// assert_eq!(mask_national_id("123456789012"), "********9012");
/// ```
pub fn mask_national_id(national_id: &str) -> String {
    if national_id.len() <= 4 {
        return "*".repeat(national_id.len());
    }
    let visible = &national_id[national_id.len() - 4..];
    format!("{}{}", "*".repeat(national_id.len() - 4), visible)
}

/// Mask a mobile number, keeping the first 3 and last 3 digits
pub fn mask_mobile(mobile: &str) -> String {
    if mobile.len() < 6 {
        return "*".repeat(mobile.len());
    }
    format!(
        "{}****{}",
        &mobile[..3],
        &mobile[mobile.len() - 3..]
    )
}

/// Mask an email address, keeping the first character and the domain
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = &local[..local.chars().next().map(char::len_utf8).unwrap_or(0)];
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Mask an OTP, keeping only the last 2 digits
pub fn mask_otp(otp: &str) -> String {
    if otp.len() < 3 {
        return "****".to_string();
    }
    format!("****{}", &otp[otp.len() - 2..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_national_id() {
        assert_eq!(mask_national_id("123456789012"), "********9012");
        assert_eq!(mask_national_id("1234"), "****");
        assert_eq!(mask_national_id(""), "");
    }

    #[test]
    fn test_mask_mobile() {
        assert_eq!(mask_mobile("9876543210"), "987****210");
        assert_eq!(mask_mobile("12345"), "*****");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("user@example.com"), "u***@example.com");
        assert_eq!(mask_email("no-at-sign"), "***");
    }

    #[test]
    fn test_mask_otp() {
        assert_eq!(mask_otp("123456"), "****56");
        assert_eq!(mask_otp("12"), "****");
    }
}
