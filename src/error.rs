use thiserror::Error;

/// Core error kinds surfaced across the engine's API boundary.
///
/// Every mutating operation either commits fully or leaves the repository
/// unchanged; these variants are the only way failure is observed, never a
/// panic or an unwind across the port boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("infeasible: {reason}")]
    Infeasible {
        reason: String,
        entity_ref: String,
    },

    #[error("unschedulable: group '{group}' course '{course}': {reason}")]
    Unschedulable {
        group: String,
        course: String,
        reason: UnschedulableReason,
    },

    #[error("regeneration timed out with {assigned_so_far} assignments placed")]
    Timeout { assigned_so_far: usize },

    #[error("attendance token missing")]
    TokenMissing,

    #[error("attendance token expired")]
    TokenExpired,

    #[error("attendance token already consumed")]
    TokenConsumed,

    #[error("class has not started yet")]
    NotYetStarted,

    #[error("class window has ended")]
    Ended,

    #[error("attendance already marked for this student and class instance")]
    AlreadyMarked,

    #[error("marker is not authorised for this class instance")]
    UnauthorisedMarker,

    #[error("student is not a member of this class instance's group")]
    WrongGroup,

    #[error("repository failure: {0}")]
    RepositoryFailure(String),
}

/// Why the scheduler's search exhausted without placing a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnschedulableReason {
    /// No room exists (or remains free) that meets capacity/equipment.
    NoRoomsFit,
    /// No teacher exists (or remains free) that is eligible.
    NoTeachersFit,
    /// Every non-break slot is already used by this group.
    NoFreeSlots,
    /// A room/teacher pair exists in isolation but every combination at
    /// every remaining slot is blocked by a global conflict.
    BlockedByGlobalConflicts,
}

impl std::fmt::Display for UnschedulableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnschedulableReason::NoRoomsFit => "no rooms fit",
            UnschedulableReason::NoTeachersFit => "no teachers fit",
            UnschedulableReason::NoFreeSlots => "no free slots remain",
            UnschedulableReason::BlockedByGlobalConflicts => "blocked by global conflicts",
        };
        write!(f, "{s}")
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
