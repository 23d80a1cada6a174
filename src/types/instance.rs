use super::{Assignment, ClassInstanceId, GroupId, StudentId, TeacherId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An assignment instantiated on a specific calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInstance {
    pub id: ClassInstanceId,
    pub assignment: Assignment,
    pub date: NaiveDate,
}

impl ClassInstance {
    pub fn new(assignment: Assignment, date: NaiveDate) -> Self {
        let id = ClassInstanceId::new(&assignment.id, date);
        Self {
            id,
            assignment,
            date,
        }
    }
}

/// Scope filter for [`crate::CoreEngine::materialise_instances`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialiseScope {
    All,
    ByGroup(GroupId),
    ByTeacher(TeacherId),
    ByStudent(StudentId),
}
