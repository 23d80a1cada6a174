mod memory;

pub use memory::InMemoryRepository;

use crate::error::Result;
use crate::types::*;
use chrono::NaiveDate;

/// The narrow read/write port the core depends on.
///
/// The core never imports a storage crate directly; every entity lookup,
/// listing, and mutation goes through this trait, so swapping the backing
/// store (SQL, document store, the in-memory reference implementation
/// below) never touches `feasibility`, `scheduler`, `materialiser`, or
/// `attendance`.
///
/// Atomicity for assignment replacement (the "transactional unit" of the
/// spec) is realised as a property of [`Repository::replace_assignments`]
/// itself rather than an explicit begin/commit handle threaded through
/// calling code: a handle type would need to be both generic over the
/// implementation and object-safe for no behavioural gain over an atomic
/// method, since this crate has exactly one reference implementation and
/// the contract only requires that no partial write is ever observable.
pub trait Repository: Send + Sync {
    // ---- entity lookups --------------------------------------------------

    fn course(&self, id: &CourseId) -> Result<Course>;
    fn courses(&self) -> Result<Vec<Course>>;

    fn teacher(&self, id: &TeacherId) -> Result<Teacher>;
    fn teachers(&self) -> Result<Vec<Teacher>>;

    fn room(&self, id: &RoomId) -> Result<Classroom>;
    fn rooms(&self) -> Result<Vec<Classroom>>;

    fn slot(&self, id: &SlotId) -> Result<TimeSlot>;
    fn slots(&self) -> Result<Vec<TimeSlot>>;

    fn group(&self, id: &GroupId) -> Result<StudentGroup>;
    fn groups(&self) -> Result<Vec<StudentGroup>>;

    fn student(&self, id: &StudentId) -> Result<Student>;
    fn students_in_group(&self, group_id: &GroupId) -> Result<Vec<Student>>;

    fn academic_year_active_on(&self, date: NaiveDate) -> Result<Option<AcademicYear>>;
    fn session_covering(&self, date: NaiveDate) -> Result<Option<Session>>;
    fn holidays_for_year(&self, year_id: &AcademicYearId) -> Result<Vec<Holiday>>;

    // ---- assignments -------------------------------------------------------

    fn assignments(&self) -> Result<Vec<Assignment>>;
    fn assignments_for_groups(&self, group_ids: &[GroupId]) -> Result<Vec<Assignment>>;

    /// Atomically clear every existing assignment for `group_ids` and
    /// install `new_assignments` in their place. Readers either see the
    /// entire prior set or the entire new set for those groups; on error,
    /// nothing changes. Bumps [`Repository::generation`].
    fn replace_assignments(
        &self,
        group_ids: &[GroupId],
        new_assignments: Vec<Assignment>,
    ) -> Result<()>;

    /// Monotonic counter bumped by every mutating call. Callers use this to
    /// invalidate caches keyed off entity/assignment state.
    fn generation(&self) -> u64;

    // ---- attendance tokens --------------------------------------------------

    fn active_token(&self, student_id: &StudentId) -> Result<Option<AttendanceToken>>;
    fn token_by_nonce(&self, nonce: &str) -> Result<Option<AttendanceToken>>;

    /// Invalidate any existing active token and install `token` as the new
    /// active token for its student. Issuance happens-before any subsequent
    /// scan on the same student (§5).
    fn issue_token(&self, token: AttendanceToken) -> Result<()>;

    /// Mark a student's active token consumed. No-op if already consumed.
    fn consume_token(&self, student_id: &StudentId) -> Result<()>;

    // ---- attendance records --------------------------------------------------

    fn attendance_record(
        &self,
        student_id: &StudentId,
        class_instance_id: &ClassInstanceId,
    ) -> Result<Option<AttendanceRecord>>;

    /// Insert `record` iff no record exists yet for its `(student, class
    /// instance)` pair. Returns `true` if inserted, `false` if one already
    /// existed (in which case `record` is discarded). This is the single
    /// atomic compare-and-insert the scan protocol (§4.5.7) and the
    /// absence sweep (§4.5) both rely on for linearisability per pair.
    fn insert_attendance_record_if_absent(&self, record: AttendanceRecord) -> Result<bool>;

    // ---- authorization -------------------------------------------------------

    /// Opaque authorisation hook: does `marker_id` hold a repository-defined
    /// role (e.g. department head, administrator) entitled to mark
    /// attendance on any class instance, independent of being its assigned
    /// teacher? The core only ever calls this as a fallback after the
    /// identity check fails.
    fn is_override_marker(&self, marker_id: &MarkerId) -> Result<bool>;
}
