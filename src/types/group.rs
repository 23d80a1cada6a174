use super::{CourseId, GroupId, StudentId};
use serde::{Deserialize, Serialize};

/// A cohort of students sharing an identical course load and schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGroup {
    pub id: GroupId,
    pub department: String,
    pub year: u32,
    pub semester: u32,
    pub courses: Vec<CourseId>,
}

impl StudentGroup {
    /// Stable sort key for group ordering in the scheduler (§4.3).
    pub fn ordering_key(&self) -> (String, u32, u32, String) {
        (
            self.department.clone(),
            self.year,
            self.semester,
            self.id.0.clone(),
        )
    }
}

/// A student, a member of exactly one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub group_id: GroupId,
}
