use super::ordering::{candidate_rooms, candidate_teachers, order_group_courses, order_groups, order_slots};
use crate::error::UnschedulableReason;
use crate::types::{
    Assignment, Classroom, Course, CourseId, GroupId, RoomId, SlotId, StudentGroup, Teacher, TeacherId, TimeSlot,
};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// One period of one (group, course) still to be placed.
struct Task {
    group_id: GroupId,
    course_id: CourseId,
}

pub enum SearchOutcome {
    Placed(Vec<Assignment>),
    Unschedulable {
        group: GroupId,
        course: CourseId,
        reason: UnschedulableReason,
    },
    TimedOut { assigned_so_far: usize },
}

struct Context<'a> {
    courses: &'a [Course],
    rooms: &'a [Classroom],
    teachers: &'a [Teacher],
    slots: Vec<&'a TimeSlot>,
    occupied_slot_room: HashSet<(SlotId, RoomId)>,
    occupied_slot_teacher: HashSet<(SlotId, TeacherId)>,
    used_slots_for_group: HashMap<GroupId, HashSet<SlotId>>,
    committed: Vec<Assignment>,
    deadline: Option<Instant>,
}

/// Runs the deterministic cross-group backtracking search for `group_ids`.
/// `background` carries assignments from groups *not* in `group_ids`, whose
/// room/teacher occupancy the search must still respect.
#[allow(clippy::too_many_arguments)]
pub fn search(
    groups: &[StudentGroup],
    courses: &[Course],
    rooms: &[Classroom],
    teachers: &[Teacher],
    slots: &[TimeSlot],
    background: &[Assignment],
    deadline: Option<Instant>,
) -> SearchOutcome {
    let ordered_groups = order_groups(groups.to_vec());
    let ordered_slots = order_slots(slots);

    let mut tasks = Vec::new();
    for group in &ordered_groups {
        for course in order_group_courses(group, courses) {
            for _ in 0..course.periods_per_week {
                tasks.push(Task {
                    group_id: group.id.clone(),
                    course_id: course.id.clone(),
                });
            }
        }
    }

    let mut occupied_slot_room = HashSet::new();
    let mut occupied_slot_teacher = HashSet::new();
    let mut used_slots_for_group: HashMap<GroupId, HashSet<SlotId>> = HashMap::new();
    for assignment in background {
        occupied_slot_room.insert((assignment.slot_id.clone(), assignment.room_id.clone()));
        occupied_slot_teacher.insert((assignment.slot_id.clone(), assignment.teacher_id.clone()));
        used_slots_for_group
            .entry(assignment.group_id.clone())
            .or_default()
            .insert(assignment.slot_id.clone());
    }

    let mut ctx = Context {
        courses,
        rooms,
        teachers,
        slots: ordered_slots,
        occupied_slot_room,
        occupied_slot_teacher,
        used_slots_for_group,
        committed: Vec::new(),
        deadline,
    };

    match solve(&tasks, 0, &mut ctx) {
        StepResult::Solved => SearchOutcome::Placed(ctx.committed),
        StepResult::Unschedulable { group, course, reason } => {
            SearchOutcome::Unschedulable { group, course, reason }
        }
        StepResult::TimedOut => SearchOutcome::TimedOut {
            assigned_so_far: ctx.committed.len(),
        },
    }
}

enum StepResult {
    Solved,
    Unschedulable {
        group: GroupId,
        course: CourseId,
        reason: UnschedulableReason,
    },
    TimedOut,
}

fn solve(tasks: &[Task], idx: usize, ctx: &mut Context) -> StepResult {
    if let Some(deadline) = ctx.deadline {
        if Instant::now() >= deadline {
            return StepResult::TimedOut;
        }
    }

    if idx == tasks.len() {
        return StepResult::Solved;
    }

    let task = &tasks[idx];
    let course = ctx
        .courses
        .iter()
        .find(|c| c.id == task.course_id)
        .expect("task course must exist in corpus")
        .clone();

    let rooms = candidate_rooms(&course, ctx.rooms);
    let teachers = candidate_teachers(&course, ctx.teachers);

    let group_used = ctx
        .used_slots_for_group
        .get(&task.group_id)
        .cloned()
        .unwrap_or_default();

    let mut any_slot_free = false;

    let slots = ctx.slots.clone();
    for slot in &slots {
        if group_used.contains(&slot.id) {
            continue;
        }
        any_slot_free = true;

        for room in &rooms {
            if ctx.occupied_slot_room.contains(&(slot.id.clone(), room.id.clone())) {
                continue;
            }
            for teacher in &teachers {
                if ctx
                    .occupied_slot_teacher
                    .contains(&(slot.id.clone(), teacher.id.clone()))
                {
                    continue;
                }

                let assignment = Assignment::new(
                    task.group_id.clone(),
                    task.course_id.clone(),
                    teacher.id.clone(),
                    room.id.clone(),
                    slot.id.clone(),
                );

                ctx.occupied_slot_room.insert((slot.id.clone(), room.id.clone()));
                ctx.occupied_slot_teacher
                    .insert((slot.id.clone(), teacher.id.clone()));
                ctx.used_slots_for_group
                    .entry(task.group_id.clone())
                    .or_default()
                    .insert(slot.id.clone());
                ctx.committed.push(assignment);

                match solve(tasks, idx + 1, ctx) {
                    StepResult::Solved => return StepResult::Solved,
                    StepResult::TimedOut => return StepResult::TimedOut,
                    StepResult::Unschedulable { .. } => {
                        ctx.committed.pop();
                        ctx.occupied_slot_room.remove(&(slot.id.clone(), room.id.clone()));
                        ctx.occupied_slot_teacher
                            .remove(&(slot.id.clone(), teacher.id.clone()));
                        ctx.used_slots_for_group
                            .get_mut(&task.group_id)
                            .expect("slot was just inserted for this group")
                            .remove(&slot.id);
                    }
                }
            }
        }
    }

    let reason = if rooms.is_empty() {
        UnschedulableReason::NoRoomsFit
    } else if teachers.is_empty() {
        UnschedulableReason::NoTeachersFit
    } else if !any_slot_free {
        UnschedulableReason::NoFreeSlots
    } else {
        UnschedulableReason::BlockedByGlobalConflicts
    };

    StepResult::Unschedulable {
        group: task.group_id.clone(),
        course: task.course_id.clone(),
        reason,
    }
}
