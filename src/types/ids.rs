use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

id_newtype!(CourseId);
id_newtype!(TeacherId);
id_newtype!(RoomId);
id_newtype!(SlotId);
id_newtype!(GroupId);
id_newtype!(StudentId);
id_newtype!(AcademicYearId);
id_newtype!(SessionId);
id_newtype!(HolidayId);

/// A teacher acting as a scanner is identified by their teacher id.
pub type MarkerId = TeacherId;

/// Deterministic identity of an assignment: a (group, slot) pair already
/// uniquely identifies it (invariant 3), the course code is carried along
/// for readability and cheap lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

impl AssignmentId {
    pub fn new(group: &GroupId, course: &CourseId, slot: &SlotId) -> Self {
        Self(format!("{}::{}::{}", group.0, course.0, slot.0))
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic identity of a class instance: `(assignment, date)`. Since
/// it is a pure function of its components, the materialiser never needs to
/// persist instances speculatively to hand callers a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassInstanceId(pub String);

impl ClassInstanceId {
    pub fn new(assignment_id: &AssignmentId, date: chrono::NaiveDate) -> Self {
        Self(format!("{}@{}", assignment_id.0, date))
    }

    /// Decode back into `(assignment id, date)`. Returns `None` if the id
    /// was not produced by [`ClassInstanceId::new`].
    pub fn decode(&self) -> Option<(AssignmentId, chrono::NaiveDate)> {
        let (assignment, date) = self.0.rsplit_once('@')?;
        let date = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        Some((AssignmentId(assignment.to_string()), date))
    }
}

impl fmt::Display for ClassInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
