use crate::error::Result;
use crate::repository::Repository;
use crate::types::{AttendanceToken, StudentId, TokenRecord};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;

/// Lifetime of a freshly issued token.
pub const TOKEN_TTL: Duration = Duration::hours(24);

/// Issue a fresh single-use token for `student_id`, invalidating any prior
/// active token. The nonce is 16 bytes (128 bits) from the OS CSPRNG,
/// hex-encoded.
pub fn issue_attendance_token(
    repo: &impl Repository,
    student_id: &StudentId,
    now: DateTime<Utc>,
) -> Result<TokenRecord> {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    let nonce = hex::encode(bytes);

    let token = AttendanceToken {
        student_id: student_id.clone(),
        nonce,
        issued_at: now,
        expires_at: now + TOKEN_TTL,
        consumed: false,
    };

    repo.issue_token(token.clone())?;
    Ok(TokenRecord::from(&token))
}
