//! Unit tests for the attempt/expiry policy

use chrono::{Duration, Utc};

use crate::domain::entities::verification_record::{VerificationRecord, VerificationStatus};
use crate::services::verification::policy::{self, AttemptDenial};

use super::mocks::identity;

#[test]
fn test_is_expired() {
    let issued_at = Utc::now();

    assert!(!policy::is_expired(issued_at, 10, issued_at));
    assert!(!policy::is_expired(
        issued_at,
        10,
        issued_at + Duration::minutes(9)
    ));
    // Boundary: exactly at expiry is not yet expired
    assert!(!policy::is_expired(
        issued_at,
        10,
        issued_at + Duration::minutes(10)
    ));
    assert!(policy::is_expired(
        issued_at,
        10,
        issued_at + Duration::minutes(10) + Duration::seconds(1)
    ));
}

#[test]
fn test_attempts_remaining_floored() {
    assert_eq!(policy::attempts_remaining(0, 3), 3);
    assert_eq!(policy::attempts_remaining(2, 3), 1);
    assert_eq!(policy::attempts_remaining(3, 3), 0);
    assert_eq!(policy::attempts_remaining(7, 3), 0);
}

#[test]
fn test_can_attempt_allows_awaiting_statuses() {
    let mut record = VerificationRecord::new(identity());
    record.attach_challenge("txn-1".to_string(), 10);

    for status in [
        VerificationStatus::Initiated,
        VerificationStatus::OtpResent,
        VerificationStatus::OtpVerificationFailed,
    ] {
        record.status = status;
        assert!(policy::can_attempt(&record, 3, Utc::now()).is_ok());
    }
}

#[test]
fn test_can_attempt_rejects_wrong_status() {
    let mut record = VerificationRecord::new(identity());
    record.attach_challenge("txn-1".to_string(), 10);
    record.status = VerificationStatus::Cancelled;

    assert_eq!(
        policy::can_attempt(&record, 3, Utc::now()),
        Err(AttemptDenial::NotAwaitingOtp(VerificationStatus::Cancelled))
    );
}

#[test]
fn test_can_attempt_rejects_expired_challenge() {
    let mut record = VerificationRecord::new(identity());
    record.attach_challenge("txn-1".to_string(), 10);

    let after_expiry = Utc::now() + Duration::minutes(11);
    assert_eq!(
        policy::can_attempt(&record, 3, after_expiry),
        Err(AttemptDenial::ChallengeExpired)
    );
}

#[test]
fn test_can_attempt_rejects_exhausted_attempts() {
    let mut record = VerificationRecord::new(identity());
    record.attach_challenge("txn-1".to_string(), 10);
    record.record_attempt();
    record.record_attempt();
    record.record_attempt();
    // Still in an awaiting status: attempts were consumed by transport
    // failures, not provider rejections
    record.status = VerificationStatus::Initiated;

    assert_eq!(
        policy::can_attempt(&record, 3, Utc::now()),
        Err(AttemptDenial::AttemptsExhausted)
    );
}

#[test]
fn test_expiry_checked_before_attempts() {
    let mut record = VerificationRecord::new(identity());
    record.attach_challenge("txn-1".to_string(), 10);
    record.record_attempt();
    record.record_attempt();
    record.record_attempt();

    let after_expiry = Utc::now() + Duration::minutes(11);
    assert_eq!(
        policy::can_attempt(&record, 3, after_expiry),
        Err(AttemptDenial::ChallengeExpired)
    );
}
