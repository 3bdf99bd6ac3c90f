//! Attempt and expiry policy for OTP challenges
//!
//! Pure functions with no I/O and an explicit `now` parameter, so every rule
//! is deterministic and directly testable. The workflow engine is the only
//! caller.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::verification_record::{VerificationRecord, VerificationStatus};

/// Why an OTP verification attempt is not allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptDenial {
    /// The record is not in an awaiting-OTP status
    NotAwaitingOtp(VerificationStatus),
    /// The live challenge has expired
    ChallengeExpired,
    /// All allowed attempts are already consumed
    AttemptsExhausted,
}

/// Whether a challenge issued at `issued_at` with the given TTL has expired
pub fn is_expired(issued_at: DateTime<Utc>, ttl_minutes: i64, now: DateTime<Utc>) -> bool {
    now > issued_at + Duration::minutes(ttl_minutes)
}

/// Attempts remaining out of `max_attempts`, floored at 0
pub fn attempts_remaining(attempt_count: i32, max_attempts: i32) -> i32 {
    (max_attempts - attempt_count).max(0)
}

/// Whether an OTP verification attempt may proceed for this record
///
/// Denials are checked in order: wrong status, expired challenge, exhausted
/// attempts. Expiry is evaluated against the challenge's derived
/// `expires_at`, which equals `issued_at + ttl`.
pub fn can_attempt(
    record: &VerificationRecord,
    max_attempts: i32,
    now: DateTime<Utc>,
) -> Result<(), AttemptDenial> {
    if !record.status.awaiting_otp() {
        return Err(AttemptDenial::NotAwaitingOtp(record.status));
    }

    if let Some(challenge) = &record.challenge {
        if now > challenge.expires_at {
            return Err(AttemptDenial::ChallengeExpired);
        }
    }

    if record.attempts_exhausted(max_attempts) {
        return Err(AttemptDenial::AttemptsExhausted);
    }

    Ok(())
}
