use super::{AssignmentId, CourseId, GroupId, RoomId, SlotId, TeacherId};
use serde::{Deserialize, Serialize};

/// A confirmed (group, course, teacher, room, slot) tuple: the scheduler's
/// unit of output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub group_id: GroupId,
    pub course_id: CourseId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub slot_id: SlotId,
}

impl Assignment {
    pub fn new(
        group_id: GroupId,
        course_id: CourseId,
        teacher_id: TeacherId,
        room_id: RoomId,
        slot_id: SlotId,
    ) -> Self {
        let id = AssignmentId::new(&group_id, &course_id, &slot_id);
        Self {
            id,
            group_id,
            course_id,
            teacher_id,
            room_id,
            slot_id,
        }
    }
}
