use crate::error::{CoreError, Result};
use crate::repository::Repository;
use crate::types::{AttendanceRecord, AttendanceStatus, ClassInstanceId, MarkerId, ScanOutcome};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Window after slot start during which an arrival still counts as present.
pub const GRACE_PERIOD: Duration = Duration::minutes(15);

/// Validate and record a single attendance scan (§4.5).
///
/// Every rejection path leaves the repository unchanged; the token is only
/// consumed and the attendance record only written once every check has
/// passed.
pub fn scan(
    repo: &impl Repository,
    nonce: &str,
    class_instance_id: &ClassInstanceId,
    marker_id: &MarkerId,
    now: DateTime<Utc>,
) -> Result<ScanOutcome> {
    let token = repo.token_by_nonce(nonce)?.ok_or(CoreError::TokenMissing)?;
    if token.consumed {
        return Err(CoreError::TokenConsumed);
    }
    if now >= token.expires_at {
        return Err(CoreError::TokenExpired);
    }

    let (assignment_id, date) = class_instance_id
        .decode()
        .ok_or_else(|| CoreError::NotFound(format!("class instance '{class_instance_id}'")))?;
    let assignment = repo
        .assignments()?
        .into_iter()
        .find(|a| a.id == assignment_id)
        .ok_or_else(|| CoreError::NotFound(format!("class instance '{class_instance_id}'")))?;

    if marker_id != &assignment.teacher_id && !repo.is_override_marker(marker_id)? {
        return Err(CoreError::UnauthorisedMarker);
    }

    let student = repo.student(&token.student_id)?;
    if student.group_id != assignment.group_id {
        return Err(CoreError::WrongGroup);
    }

    let slot = repo.slot(&assignment.slot_id)?;
    let start = Utc.from_utc_datetime(&date.and_time(slot.start));
    let end = Utc.from_utc_datetime(&date.and_time(slot.end));

    if now < start {
        return Err(CoreError::NotYetStarted);
    }
    if now > end {
        return Err(CoreError::Ended);
    }

    let (status, outcome) = if now > start + GRACE_PERIOD {
        let minutes_late = (now - start).num_minutes().max(0) as u32;
        (AttendanceStatus::Late, ScanOutcome::Late { minutes_late })
    } else {
        (AttendanceStatus::Present, ScanOutcome::Present)
    };

    let record = AttendanceRecord {
        student_id: token.student_id.clone(),
        class_instance_id: class_instance_id.clone(),
        status,
        marked_at: now,
        marker: marker_id.clone(),
    };

    if !repo.insert_attendance_record_if_absent(record)? {
        return Err(CoreError::AlreadyMarked);
    }

    repo.consume_token(&token.student_id)?;
    Ok(outcome)
}
