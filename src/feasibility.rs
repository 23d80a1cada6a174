//! Necessary-condition checks run before the scheduler ever attempts a
//! search. A pass here is not a promise of schedulability, only that no
//! obviously-missing resource rules it out up front.

use crate::error::{CoreError, Result};
use crate::repository::Repository;
use crate::types::{Classroom, Course, Teacher, TimeSlot};

/// Run the fixed-order checks of the feasibility analyser, short-circuiting
/// at the first failure.
pub fn check_feasibility(repo: &impl Repository) -> Result<()> {
    let courses = repo.courses()?;
    let rooms = repo.rooms()?;
    let teachers = repo.teachers()?;
    let slots = repo.slots()?;
    let groups = repo.groups()?;

    resource_census(&courses, &rooms, &teachers, &slots, &groups)?;
    group_course_coverage(&groups)?;
    capacity_feasibility(&courses, &rooms)?;
    equipment_feasibility(&courses, &rooms)?;
    qualification_feasibility(&courses, &teachers)?;

    let non_break_slots = slots.iter().filter(|s| !s.is_break).count();
    global_slot_budget(&courses, &groups, non_break_slots)?;
    per_group_budget(&courses, &groups, non_break_slots)?;

    Ok(())
}

fn infeasible(reason: impl Into<String>, entity_ref: impl Into<String>) -> CoreError {
    CoreError::Infeasible {
        reason: reason.into(),
        entity_ref: entity_ref.into(),
    }
}

fn resource_census(
    courses: &[Course],
    rooms: &[Classroom],
    teachers: &[Teacher],
    slots: &[TimeSlot],
    groups: &[crate::types::StudentGroup],
) -> Result<()> {
    if courses.is_empty() {
        return Err(infeasible("no courses defined", "courses"));
    }
    if rooms.is_empty() {
        return Err(infeasible("no rooms defined", "rooms"));
    }
    if teachers.is_empty() {
        return Err(infeasible("no teachers defined", "teachers"));
    }
    if slots.is_empty() {
        return Err(infeasible("no slots defined", "slots"));
    }
    if groups.is_empty() {
        return Err(infeasible("no groups defined", "groups"));
    }
    Ok(())
}

fn group_course_coverage(groups: &[crate::types::StudentGroup]) -> Result<()> {
    for group in groups {
        if group.courses.is_empty() {
            return Err(infeasible(
                "group has no assigned courses",
                group.id.to_string(),
            ));
        }
    }
    Ok(())
}

fn capacity_feasibility(courses: &[Course], rooms: &[Classroom]) -> Result<()> {
    for course in courses {
        if !rooms.iter().any(|r| r.satisfies_capacity(course.min_capacity)) {
            return Err(infeasible(
                format!("no room meets minimum capacity {}", course.min_capacity),
                course.id.to_string(),
            ));
        }
    }
    Ok(())
}

fn equipment_feasibility(courses: &[Course], rooms: &[Classroom]) -> Result<()> {
    for course in courses {
        if !rooms
            .iter()
            .any(|r| r.satisfies_equipment(&course.required_equipment))
        {
            return Err(infeasible(
                "no room satisfies required equipment",
                course.id.to_string(),
            ));
        }
    }
    Ok(())
}

fn qualification_feasibility(courses: &[Course], teachers: &[Teacher]) -> Result<()> {
    for course in courses {
        if !teachers.iter().any(|t| t.is_eligible_for(&course.department)) {
            return Err(infeasible(
                "no eligible teacher for department",
                course.id.to_string(),
            ));
        }
    }
    Ok(())
}

fn global_slot_budget(
    courses: &[Course],
    groups: &[crate::types::StudentGroup],
    non_break_slots: usize,
) -> Result<()> {
    let total_periods: u64 = groups
        .iter()
        .flat_map(|g| g.courses.iter())
        .filter_map(|course_id| courses.iter().find(|c| &c.id == course_id))
        .map(|c| c.periods_per_week as u64)
        .sum();

    let budget = non_break_slots as u64 * groups.len() as u64;
    if total_periods > budget {
        return Err(infeasible(
            format!(
                "global demand {total_periods} periods exceeds budget {budget} (slots x groups)"
            ),
            "schedule",
        ));
    }
    Ok(())
}

fn per_group_budget(
    courses: &[Course],
    groups: &[crate::types::StudentGroup],
    non_break_slots: usize,
) -> Result<()> {
    for group in groups {
        let demand: u64 = group
            .courses
            .iter()
            .filter_map(|course_id| courses.iter().find(|c| &c.id == course_id))
            .map(|c| c.periods_per_week as u64)
            .sum();
        if demand > non_break_slots as u64 {
            return Err(infeasible(
                format!("group demand {demand} periods exceeds {non_break_slots} available slots"),
                group.id.to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::types::*;
    use chrono::NaiveTime;

    fn base_repo() -> InMemoryRepository {
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
    fn minimal_setup_is_feasible() {
        assert!(check_feasibility(&base_repo()).is_ok());
    }

    #[test]
    fn missing_rooms_is_infeasible() {
        let repo = InMemoryRepository::new()
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
                qualifications: vec![],
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
            });

        assert!(matches!(
            check_feasibility(&repo),
            Err(CoreError::Infeasible { .. })
        ));
    }

    #[test]
    fn capacity_shortfall_is_infeasible() {
        let mut repo = base_repo();
        repo = repo.with_course(Course {
            id: CourseId::from("big"),
            name: "Big".to_string(),
            department: "math".to_string(),
            periods_per_week: 1,
            min_capacity: 1000,
            required_equipment: vec![],
        });
        let repo = repo.with_group(StudentGroup {
            id: GroupId::from("g2"),
            department: "math".to_string(),
            year: 1,
            semester: 1,
            courses: vec![CourseId::from("big")],
        });

        let err = check_feasibility(&repo).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Infeasible { entity_ref, .. } if entity_ref == "big"
        ));
    }

    #[test]
    fn per_group_budget_overflow_is_infeasible() {
        let repo = InMemoryRepository::new()
            .with_course(Course {
                id: CourseId::from("heavy"),
                name: "Heavy".to_string(),
                department: "math".to_string(),
                periods_per_week: 5,
                min_capacity: 10,
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
                courses: vec![CourseId::from("heavy")],
            });

        assert!(matches!(
            check_feasibility(&repo),
            Err(CoreError::Infeasible { .. })
        ));
    }
}
