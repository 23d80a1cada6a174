use crate::error::Result;
use crate::repository::Repository;
use crate::types::{AttendanceRecord, AttendanceStatus, ClassInstanceId};
use chrono::{DateTime, TimeZone, Utc};

/// Create `absent` records for every member of a class instance's group
/// lacking any record. Safe to call repeatedly: a second call always
/// inserts zero records, and never downgrades an existing present/late one.
pub fn sweep_absences(
    repo: &impl Repository,
    class_instance_id: &ClassInstanceId,
    now: DateTime<Utc>,
) -> Result<usize> {
    let (assignment_id, date) = class_instance_id
        .decode()
        .ok_or_else(|| crate::error::CoreError::NotFound(format!("class instance '{class_instance_id}'")))?;
    let assignment = repo
        .assignments()?
        .into_iter()
        .find(|a| a.id == assignment_id)
        .ok_or_else(|| crate::error::CoreError::NotFound(format!("class instance '{class_instance_id}'")))?;

    let slot = repo.slot(&assignment.slot_id)?;
    let end = Utc.from_utc_datetime(&date.and_time(slot.end));
    if now < end {
        return Err(crate::error::CoreError::NotYetStarted);
    }

    let roster = repo.students_in_group(&assignment.group_id)?;
    let mut created = 0;
    for student in roster {
        if repo.attendance_record(&student.id, class_instance_id)?.is_some() {
            continue;
        }
        let record = AttendanceRecord {
            student_id: student.id,
            class_instance_id: class_instance_id.clone(),
            status: AttendanceStatus::Absent,
            marked_at: now,
            marker: assignment.teacher_id.clone(),
        };
        if repo.insert_attendance_record_if_absent(record)? {
            created += 1;
        }
    }
    Ok(created)
}
