//! Projects weekly assignments onto concrete calendar dates.

use crate::error::Result;
use crate::repository::Repository;
use crate::types::{Assignment, ClassInstance, MaterialiseScope, Weekday};
use chrono::{Datelike, NaiveDate};

/// Emit every class instance in `[range.0, range.1)` matching `scope`.
///
/// Idempotent and cache-free by construction: `ClassInstanceId` is a pure
/// function of `(assignment id, date)`, so calling this twice with the same
/// arguments against unchanged state always yields an equal result. Callers
/// that want memoisation stamp results with [`Repository::generation`]
/// themselves (see [`crate::engine::CoreEngine`]).
pub fn materialise_instances(
    repo: &impl Repository,
    range: (NaiveDate, NaiveDate),
    scope: &MaterialiseScope,
) -> Result<Vec<ClassInstance>> {
    let assignments = repo.assignments()?;
    let mut scoped: Vec<&Assignment> = Vec::new();
    for assignment in &assignments {
        if matches_scope(repo, assignment, scope)? {
            scoped.push(assignment);
        }
    }

    let mut out = Vec::new();
    let mut cursor = range.0;
    while cursor < range.1 {
        if is_schedulable_date(repo, cursor)? {
            let weekday = Weekday::from_chrono(cursor.weekday());
            if let Some(weekday) = weekday {
                for assignment in &scoped {
                    let slot = repo.slot(&assignment.slot_id)?;
                    if slot.weekday == weekday {
                        out.push(ClassInstance::new((*assignment).clone(), cursor));
                    }
                }
            }
        }
        cursor = cursor.succ_opt().expect("date overflow");
    }

    Ok(out)
}

fn is_schedulable_date(repo: &impl Repository, date: NaiveDate) -> Result<bool> {
    let Some(year) = repo.academic_year_active_on(date)? else {
        return Ok(false);
    };
    if repo.session_covering(date)?.is_none() {
        return Ok(false);
    }
    let holidays = repo.holidays_for_year(&year.id)?;
    if holidays.iter().any(|h| h.range.contains(date)) {
        return Ok(false);
    }
    Ok(true)
}

fn matches_scope(repo: &impl Repository, assignment: &Assignment, scope: &MaterialiseScope) -> Result<bool> {
    Ok(match scope {
        MaterialiseScope::All => true,
        MaterialiseScope::ByGroup(group_id) => &assignment.group_id == group_id,
        MaterialiseScope::ByTeacher(teacher_id) => &assignment.teacher_id == teacher_id,
        MaterialiseScope::ByStudent(student_id) => {
            let student = repo.student(student_id)?;
            student.group_id == assignment.group_id
        }
    })
}
