//! Static ordering heuristics. All enumerations here are stable: identical
//! inputs always yield identical output order, which is what makes
//! `regenerate` deterministic.

use crate::types::{Classroom, Course, StudentGroup, Teacher, TimeSlot};

/// Groups in (department, year, semester, id) order.
pub fn order_groups(mut groups: Vec<StudentGroup>) -> Vec<StudentGroup> {
    groups.sort_by_key(|g| g.ordering_key());
    groups
}

/// A group's courses, descending periods-per-week then ascending course id.
pub fn order_group_courses<'a>(group: &StudentGroup, courses: &'a [Course]) -> Vec<&'a Course> {
    let mut picked: Vec<&Course> = group
        .courses
        .iter()
        .filter_map(|id| courses.iter().find(|c| &c.id == id))
        .collect();
    picked.sort_by(|a, b| b.periods_per_week.cmp(&a.periods_per_week).then_with(|| a.id.0.cmp(&b.id.0)));
    picked
}

/// Non-break slots, weekday then start-time order.
pub fn order_slots(slots: &[TimeSlot]) -> Vec<&TimeSlot> {
    let mut usable: Vec<&TimeSlot> = slots.iter().filter(|s| !s.is_break).collect();
    usable.sort_by_key(|s| (s.weekday, s.start));
    usable
}

/// Rooms satisfying a course's capacity and equipment requirements, ordered
/// capacity-ascending then id. Occupancy is checked by the caller at search
/// time, not here: this ordering is fixed per course for the whole search.
pub fn candidate_rooms<'a>(course: &Course, rooms: &'a [Classroom]) -> Vec<&'a Classroom> {
    let mut candidates: Vec<&Classroom> = rooms
        .iter()
        .filter(|r| r.satisfies_capacity(course.min_capacity))
        .filter(|r| r.satisfies_equipment(&course.required_equipment))
        .collect();
    candidates.sort_by(|a, b| a.capacity.cmp(&b.capacity).then_with(|| a.id.0.cmp(&b.id.0)));
    candidates
}

/// Eligible teachers for a course's department, ordered by id.
pub fn candidate_teachers<'a>(course: &Course, teachers: &'a [Teacher]) -> Vec<&'a Teacher> {
    let mut candidates: Vec<&Teacher> = teachers
        .iter()
        .filter(|t| t.is_eligible_for(&course.department))
        .collect();
    candidates.sort_by(|a, b| a.id.0.cmp(&b.id.0));
    candidates
}
