use super::Repository;
use crate::error::{CoreError, Result};
use crate::types::*;
use chrono::NaiveDate;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// A fully in-process reference implementation of [`Repository`], backed by
/// concurrent maps (`dashmap::DashMap`) rather than a single `Mutex`-guarded
/// `HashMap`, so concurrent scan requests never contend on a single lock —
/// only on the shard holding the specific key they touch (§5).
///
/// Not a mock: it honours the full port contract, including atomic
/// assignment replacement and the generation counter, and is suitable as
/// the sole storage backend for an embedded deployment of the core.
#[derive(Default)]
pub struct InMemoryRepository {
    courses: DashMap<CourseId, Course>,
    teachers: DashMap<TeacherId, Teacher>,
    rooms: DashMap<RoomId, Classroom>,
    slots: DashMap<SlotId, TimeSlot>,
    groups: DashMap<GroupId, StudentGroup>,
    students: DashMap<StudentId, Student>,
    academic_years: DashMap<AcademicYearId, AcademicYear>,
    sessions: DashMap<SessionId, Session>,
    holidays: DashMap<HolidayId, Holiday>,

    assignments: DashMap<AssignmentId, Assignment>,

    active_tokens: DashMap<StudentId, AttendanceToken>,
    nonce_index: DashMap<String, StudentId>,

    attendance: DashMap<(StudentId, ClassInstanceId), AttendanceRecord>,

    override_markers: DashMap<MarkerId, ()>,

    generation: AtomicU64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump_generation(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    // ---- fixture-loading helpers used by the demo binary and tests -------

    pub fn with_course(self, course: Course) -> Self {
        self.courses.insert(course.id.clone(), course);
        self
    }

    pub fn with_teacher(self, teacher: Teacher) -> Self {
        self.teachers.insert(teacher.id.clone(), teacher);
        self
    }

    pub fn with_room(self, room: Classroom) -> Self {
        self.rooms.insert(room.id.clone(), room);
        self
    }

    pub fn with_slot(self, slot: TimeSlot) -> Self {
        self.slots.insert(slot.id.clone(), slot);
        self
    }

    pub fn with_group(self, group: StudentGroup) -> Self {
        self.groups.insert(group.id.clone(), group);
        self
    }

    pub fn with_student(self, student: Student) -> Self {
        self.students.insert(student.id.clone(), student);
        self
    }

    pub fn with_academic_year(self, year: AcademicYear) -> Self {
        self.academic_years.insert(year.id.clone(), year);
        self
    }

    pub fn with_session(self, session: Session) -> Self {
        self.sessions.insert(session.id.clone(), session);
        self
    }

    pub fn with_holiday(self, holiday: Holiday) -> Self {
        self.holidays.insert(holiday.id.clone(), holiday);
        self
    }

    /// Grant `marker_id` the repository-defined override role (§4.1).
    pub fn with_override_marker(self, marker_id: MarkerId) -> Self {
        self.override_markers.insert(marker_id, ());
        self
    }
}

impl Repository for InMemoryRepository {
    fn course(&self, id: &CourseId) -> Result<Course> {
        self.courses
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| CoreError::NotFound(format!("course '{id}'")))
    }

    fn courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.iter().map(|r| r.value().clone()).collect())
    }

    fn teacher(&self, id: &TeacherId) -> Result<Teacher> {
        self.teachers
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| CoreError::NotFound(format!("teacher '{id}'")))
    }

    fn teachers(&self) -> Result<Vec<Teacher>> {
        Ok(self.teachers.iter().map(|r| r.value().clone()).collect())
    }

    fn room(&self, id: &RoomId) -> Result<Classroom> {
        self.rooms
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| CoreError::NotFound(format!("room '{id}'")))
    }

    fn rooms(&self) -> Result<Vec<Classroom>> {
        Ok(self.rooms.iter().map(|r| r.value().clone()).collect())
    }

    fn slot(&self, id: &SlotId) -> Result<TimeSlot> {
        self.slots
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| CoreError::NotFound(format!("slot '{id}'")))
    }

    fn slots(&self) -> Result<Vec<TimeSlot>> {
        Ok(self.slots.iter().map(|r| r.value().clone()).collect())
    }

    fn group(&self, id: &GroupId) -> Result<StudentGroup> {
        self.groups
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| CoreError::NotFound(format!("group '{id}'")))
    }

    fn groups(&self) -> Result<Vec<StudentGroup>> {
        Ok(self.groups.iter().map(|r| r.value().clone()).collect())
    }

    fn student(&self, id: &StudentId) -> Result<Student> {
        self.students
            .get(id)
            .map(|r| r.clone())
            .ok_or_else(|| CoreError::NotFound(format!("student '{id}'")))
    }

    fn students_in_group(&self, group_id: &GroupId) -> Result<Vec<Student>> {
        Ok(self
            .students
            .iter()
            .filter(|r| &r.group_id == group_id)
            .map(|r| r.value().clone())
            .collect())
    }

    fn academic_year_active_on(&self, date: NaiveDate) -> Result<Option<AcademicYear>> {
        Ok(self
            .academic_years
            .iter()
            .find(|r| r.range.contains(date))
            .map(|r| r.value().clone()))
    }

    fn session_covering(&self, date: NaiveDate) -> Result<Option<Session>> {
        Ok(self
            .sessions
            .iter()
            .find(|r| r.range.contains(date))
            .map(|r| r.value().clone()))
    }

    fn holidays_for_year(&self, year_id: &AcademicYearId) -> Result<Vec<Holiday>> {
        Ok(self
            .holidays
            .iter()
            .filter(|r| &r.academic_year_id == year_id)
            .map(|r| r.value().clone())
            .collect())
    }

    fn assignments(&self) -> Result<Vec<Assignment>> {
        Ok(self.assignments.iter().map(|r| r.value().clone()).collect())
    }

    fn assignments_for_groups(&self, group_ids: &[GroupId]) -> Result<Vec<Assignment>> {
        Ok(self
            .assignments
            .iter()
            .filter(|r| group_ids.contains(&r.group_id))
            .map(|r| r.value().clone())
            .collect())
    }

    fn replace_assignments(
        &self,
        group_ids: &[GroupId],
        new_assignments: Vec<Assignment>,
    ) -> Result<()> {
        debug_assert!(
            new_assignments.iter().all(|a| group_ids.contains(&a.group_id)),
            "replace_assignments received an assignment outside group_ids"
        );

        let stale: Vec<AssignmentId> = self
            .assignments
            .iter()
            .filter(|r| group_ids.contains(&r.group_id))
            .map(|r| r.id.clone())
            .collect();

        for id in stale {
            self.assignments.remove(&id);
        }
        for assignment in new_assignments {
            self.assignments.insert(assignment.id.clone(), assignment);
        }

        self.bump_generation();
        Ok(())
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn active_token(&self, student_id: &StudentId) -> Result<Option<AttendanceToken>> {
        Ok(self.active_tokens.get(student_id).map(|r| r.clone()))
    }

    fn token_by_nonce(&self, nonce: &str) -> Result<Option<AttendanceToken>> {
        let Some(student_id) = self.nonce_index.get(nonce).map(|r| r.clone()) else {
            return Ok(None);
        };
        Ok(self.active_tokens.get(&student_id).and_then(|r| {
            if r.nonce == nonce {
                Some(r.clone())
            } else {
                None
            }
        }))
    }

    fn issue_token(&self, token: AttendanceToken) -> Result<()> {
        if let Some(prior) = self.active_tokens.get(&token.student_id) {
            self.nonce_index.remove(&prior.nonce);
        }
        self.nonce_index
            .insert(token.nonce.clone(), token.student_id.clone());
        self.active_tokens.insert(token.student_id.clone(), token);
        self.bump_generation();
        Ok(())
    }

    fn consume_token(&self, student_id: &StudentId) -> Result<()> {
        if let Some(mut token) = self.active_tokens.get_mut(student_id) {
            token.consumed = true;
        }
        self.bump_generation();
        Ok(())
    }

    fn attendance_record(
        &self,
        student_id: &StudentId,
        class_instance_id: &ClassInstanceId,
    ) -> Result<Option<AttendanceRecord>> {
        Ok(self
            .attendance
            .get(&(student_id.clone(), class_instance_id.clone()))
            .map(|r| r.clone()))
    }

    fn insert_attendance_record_if_absent(&self, record: AttendanceRecord) -> Result<bool> {
        let key = (record.student_id.clone(), record.class_instance_id.clone());
        match self.attendance.entry(key) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(v) => {
                v.insert(record);
                self.bump_generation();
                Ok(true)
            }
        }
    }

    fn is_override_marker(&self, marker_id: &MarkerId) -> Result<bool> {
        Ok(self.override_markers.contains_key(marker_id))
    }
}
