use super::TeacherId;
use serde::{Deserialize, Serialize};

/// A teacher and the subject-area tokens (departments) they may teach.
///
/// An empty `qualifications` set is a wild-card: such a teacher is eligible
/// for any course, regardless of department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub qualifications: Vec<String>,
}

impl Teacher {
    /// A teacher is eligible for a course iff the course's department is in
    /// their qualification set, or that set is empty (wild-card).
    pub fn is_eligible_for(&self, course_department: &str) -> bool {
        self.qualifications.is_empty()
            || self
                .qualifications
                .iter()
                .any(|q| q == course_department)
    }
}
