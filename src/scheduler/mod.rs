mod ordering;
mod search;

use crate::error::{CoreError, Result};
use crate::repository::Repository;
use crate::types::GroupId;
use search::SearchOutcome;
use std::time::Instant;

/// Successful outcome of [`crate::CoreEngine::regenerate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenerateReport {
    pub assignment_count: usize,
}

/// Regenerate the timetable for `group_ids`, leaving every other group's
/// assignments untouched and treated as fixed background occupancy.
///
/// On success, commits through [`Repository::replace_assignments`]
/// atomically. On failure, the repository is never mutated.
pub fn regenerate(
    repo: &impl Repository,
    group_ids: &[GroupId],
    deadline: Option<Instant>,
) -> Result<RegenerateReport> {
    let all_groups = repo.groups()?;
    let target_groups: Vec<_> = all_groups
        .iter()
        .filter(|g| group_ids.contains(&g.id))
        .cloned()
        .collect();

    let courses = repo.courses()?;
    let rooms = repo.rooms()?;
    let teachers = repo.teachers()?;
    let slots = repo.slots()?;

    let background: Vec<_> = repo
        .assignments()?
        .into_iter()
        .filter(|a| !group_ids.contains(&a.group_id))
        .collect();

    match search::search(&target_groups, &courses, &rooms, &teachers, &slots, &background, deadline) {
        SearchOutcome::Placed(assignments) => {
            let count = assignments.len();
            repo.replace_assignments(group_ids, assignments)?;
            Ok(RegenerateReport { assignment_count: count })
        }
        SearchOutcome::Unschedulable { group, course, reason } => Err(CoreError::Unschedulable {
            group: group.to_string(),
            course: course.to_string(),
            reason,
        }),
        SearchOutcome::TimedOut { assigned_so_far } => Err(CoreError::Timeout { assigned_so_far }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::types::*;
    use chrono::NaiveTime;

    fn trivial_repo() -> InMemoryRepository {
        InMemoryRepository::new()
            .with_course(Course {
                id: CourseId::from("math101"),
                name: "Math".to_string(),
                department: "math".to_string(),
                periods_per_week: 1,
                min_capacity: 20,
                required_equipment: vec![],
            })
            .with_teacher(Teacher {
                id: TeacherId::from("t1"),
                name: "Teacher".to_string(),
                department: "math".to_string(),
                qualifications: vec!["math".to_string()],
            })
            .with_room(Classroom {
                id: RoomId::from("r1"),
                name: "Room".to_string(),
                capacity: 30,
                equipment: vec![],
            })
            .with_slot(TimeSlot {
                id: SlotId::from("mon-0900"),
                weekday: Weekday::Monday,
                start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                is_break: false,
            })
            .with_group(StudentGroup {
                id: GroupId::from("g1"),
                department: "math".to_string(),
                year: 1,
                semester: 1,
                courses: vec![CourseId::from("math101")],
            })
    }

    #[test]
    fn trivial_schedule_places_one_assignment() {
        let repo = trivial_repo();
        let report = regenerate(&repo, &[GroupId::from("g1")], None).unwrap();
        assert_eq!(report.assignment_count, 1);
        assert_eq!(repo.assignments().unwrap().len(), 1);
    }

    #[test]
    fn break_slot_is_never_used() {
        let repo = trivial_repo().with_slot(TimeSlot {
            id: SlotId::from("mon-1100"),
            weekday: Weekday::Monday,
            start: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(11, 15, 0).unwrap(),
            is_break: true,
        });
        let report = regenerate(&repo, &[GroupId::from("g1")], None).unwrap();
        assert_eq!(report.assignment_count, 1);
        let assignments = repo.assignments().unwrap();
        assert_eq!(assignments[0].slot_id, SlotId::from("mon-0900"));
    }

    #[test]
    fn capacity_shortfall_is_unschedulable() {
        let repo = InMemoryRepository::new()
            .with_course(Course {
                id: CourseId::from("big"),
                name: "Big".to_string(),
                department: "math".to_string(),
                periods_per_week: 1,
                min_capacity: 1000,
                required_equipment: vec![],
            })
            .with_teacher(Teacher {
                id: TeacherId::from("t1"),
                name: "Teacher".to_string(),
                department: "math".to_string(),
                qualifications: vec![],
            })
            .with_room(Classroom {
                id: RoomId::from("r1"),
                name: "Room".to_string(),
                capacity: 30,
                equipment: vec![],
            })
            .with_slot(TimeSlot {
                id: SlotId::from("mon-0900"),
                weekday: Weekday::Monday,
                start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                is_break: false,
            })
            .with_group(StudentGroup {
                id: GroupId::from("g1"),
                department: "math".to_string(),
                year: 1,
                semester: 1,
                courses: vec![CourseId::from("big")],
            });

        let err = regenerate(&repo, &[GroupId::from("g1")], None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Unschedulable {
                reason: crate::error::UnschedulableReason::NoRoomsFit,
                ..
            }
        ));
    }

    #[test]
    fn regeneration_is_deterministic() {
        let repo_a = trivial_repo();
        let repo_b = trivial_repo();
        regenerate(&repo_a, &[GroupId::from("g1")], None).unwrap();
        regenerate(&repo_b, &[GroupId::from("g1")], None).unwrap();

        let mut a = repo_a.assignments().unwrap();
        let mut b = repo_b.assignments().unwrap();
        a.sort_by(|x, y| x.id.0.cmp(&y.id.0));
        b.sort_by(|x, y| x.id.0.cmp(&y.id.0));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.room_id, y.room_id);
            assert_eq!(x.teacher_id, y.teacher_id);
        }
    }

    #[test]
    fn other_groups_assignments_survive_regeneration() {
        let repo = trivial_repo()
            .with_group(StudentGroup {
                id: GroupId::from("g2"),
                department: "math".to_string(),
                year: 1,
                semester: 1,
                courses: vec![CourseId::from("math101")],
            })
            .with_room(Classroom {
                id: RoomId::from("r2"),
                name: "Room 2".to_string(),
                capacity: 30,
                equipment: vec![],
            });

        regenerate(&repo, &[GroupId::from("g1"), GroupId::from("g2")], None).unwrap();
        assert_eq!(repo.assignments().unwrap().len(), 2);

        regenerate(&repo, &[GroupId::from("g1")], None).unwrap();
        let assignments = repo.assignments().unwrap();
        assert_eq!(assignments.len(), 2);
        assert!(assignments.iter().any(|a| a.group_id == GroupId::from("g2")));
    }
}
