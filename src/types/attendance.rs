use super::{ClassInstanceId, MarkerId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Single-use, time-bounded credential tying a student to at most one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceToken {
    pub student_id: StudentId,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}

/// The value returned to a caller after issuing a token — the nonce is the
/// part a caller hands back on scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub student_id: StudentId,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&AttendanceToken> for TokenRecord {
    fn from(token: &AttendanceToken) -> Self {
        Self {
            student_id: token.student_id.clone(),
            nonce: token.nonce.clone(),
            issued_at: token.issued_at,
            expires_at: token.expires_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
}

/// An immutable attendance record for a (student, class-instance) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: StudentId,
    pub class_instance_id: ClassInstanceId,
    pub status: AttendanceStatus,
    pub marked_at: DateTime<Utc>,
    pub marker: MarkerId,
}

/// The successful outcome of a [`crate::CoreEngine::scan`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Present,
    Late { minutes_late: u32 },
}
