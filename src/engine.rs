//! The facade the outside world actually calls: six operations bracketing
//! the feasibility/scheduler/materialiser/attendance components behind one
//! generic handle over a [`Repository`].

use crate::attendance::{issue_attendance_token as issue_token_impl, run_scan, sweep_absences as sweep_impl};
use crate::error::Result;
use crate::feasibility::check_feasibility as check_feasibility_impl;
use crate::materialiser::materialise_instances as materialise_impl;
use crate::repository::Repository;
use crate::scheduler::{regenerate as regenerate_impl, RegenerateReport};
use crate::types::{ClassInstance, ClassInstanceId, GroupId, MarkerId, MaterialiseScope, ScanOutcome, StudentId, TokenRecord};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Mutex;
use std::time::Instant;

struct InstanceCacheEntry {
    generation: u64,
    range: (NaiveDate, NaiveDate),
    scope: MaterialiseScope,
    instances: Vec<ClassInstance>,
}

/// In-process entry point wiring a concrete [`Repository`] to the five
/// components. Regeneration is serialised behind a single mutex (§5); scans
/// take no engine-wide lock and rely on the repository's own per-key
/// atomicity instead.
pub struct CoreEngine<R: Repository> {
    repo: R,
    regenerate_lock: Mutex<()>,
    instance_cache: Mutex<Option<InstanceCacheEntry>>,
}

impl<R: Repository> CoreEngine<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            regenerate_lock: Mutex::new(()),
            instance_cache: Mutex::new(None),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn check_feasibility(&self) -> Result<()> {
        check_feasibility_impl(&self.repo)
    }

    pub fn regenerate(&self, group_ids: &[GroupId], deadline: Option<Instant>) -> Result<RegenerateReport> {
        let _guard = self.regenerate_lock.lock().expect("regeneration mutex poisoned");
        regenerate_impl(&self.repo, group_ids, deadline)
    }

    pub fn materialise_instances(
        &self,
        range: (NaiveDate, NaiveDate),
        scope: MaterialiseScope,
    ) -> Result<Vec<ClassInstance>> {
        let generation = self.repo.generation();
        {
            let cache = self.instance_cache.lock().expect("instance cache mutex poisoned");
            if let Some(entry) = cache.as_ref() {
                if entry.generation == generation && entry.range == range && entry.scope == scope {
                    return Ok(entry.instances.clone());
                }
            }
        }

        let instances = materialise_impl(&self.repo, range, &scope)?;
        let mut cache = self.instance_cache.lock().expect("instance cache mutex poisoned");
        *cache = Some(InstanceCacheEntry {
            generation,
            range,
            scope,
            instances: instances.clone(),
        });
        Ok(instances)
    }

    pub fn issue_attendance_token(&self, student_id: &StudentId, now: DateTime<Utc>) -> Result<TokenRecord> {
        issue_token_impl(&self.repo, student_id, now)
    }

    pub fn scan(
        &self,
        nonce: &str,
        class_instance_id: &ClassInstanceId,
        marker_id: &MarkerId,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome> {
        run_scan(&self.repo, nonce, class_instance_id, marker_id, now)
    }

    pub fn sweep_absences(&self, class_instance_id: &ClassInstanceId, now: DateTime<Utc>) -> Result<usize> {
        sweep_impl(&self.repo, class_instance_id, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::types::*;
    use chrono::{NaiveTime, TimeZone};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn materialise_cache_is_invalidated_by_regeneration() {
        let repo = InMemoryRepository::new()
            .with_course(Course {
                id: CourseId::from("math101"),
                name: "Math".to_string(),
                department: "math".to_string(),
                periods_per_week: 1,
                min_capacity: 20,
                required_equipment: vec![],
            })
            .with_teacher(Teacher {
                id: TeacherId::from("t1"),
                name: "Teacher".to_string(),
                department: "math".to_string(),
                qualifications: vec!["math".to_string()],
            })
            .with_room(Classroom {
                id: RoomId::from("r1"),
                name: "Room".to_string(),
                capacity: 30,
                equipment: vec![],
            })
            .with_slot(TimeSlot {
                id: SlotId::from("mon-0900"),
                weekday: Weekday::Monday,
                start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                is_break: false,
            })
            .with_group(StudentGroup {
                id: GroupId::from("g1"),
                department: "math".to_string(),
                year: 1,
                semester: 1,
                courses: vec![CourseId::from("math101")],
            })
            .with_academic_year(AcademicYear {
                id: AcademicYearId::from("y1"),
                name: "2025-26".to_string(),
                range: DateRange::new(d("2025-08-01"), d("2026-06-01")),
            })
            .with_session(Session {
                id: SessionId::from("s1"),
                academic_year_id: AcademicYearId::from("y1"),
                name: "Fall".to_string(),
                range: DateRange::new(d("2025-09-01"), d("2025-12-20")),
            });

        let engine = CoreEngine::new(repo);
        let range = (d("2025-09-01"), d("2025-09-08"));

        let before = engine.materialise_instances(range, MaterialiseScope::All).unwrap();
        assert!(before.is_empty());

        engine.regenerate(&[GroupId::from("g1")], None).unwrap();

        let after = engine.materialise_instances(range, MaterialiseScope::All).unwrap();
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn full_round_trip_issue_scan_consume() {
        let repo = InMemoryRepository::new()
            .with_student(Student {
                id: StudentId::from("s1"),
                name: "Student".to_string(),
                group_id: GroupId::from("g1"),
            })
            .with_slot(TimeSlot {
                id: SlotId::from("mon-0900"),
                weekday: Weekday::Monday,
                start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                is_break: false,
            });

        let assignment = Assignment::new(
            GroupId::from("g1"),
            CourseId::from("math101"),
            TeacherId::from("t1"),
            RoomId::from("r1"),
            SlotId::from("mon-0900"),
        );
        let instance_id = ClassInstanceId::new(&assignment.id, d("2025-09-01"));
        repo.replace_assignments(&[GroupId::from("g1")], vec![assignment]).unwrap();

        let engine = CoreEngine::new(repo);
        let now = Utc.from_utc_datetime(&d("2025-09-01").and_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
        let token = engine.issue_attendance_token(&StudentId::from("s1"), now).unwrap();

        let scan_time = Utc.from_utc_datetime(&d("2025-09-01").and_time(NaiveTime::from_hms_opt(9, 5, 0).unwrap()));
        let outcome = engine
            .scan(&token.nonce, &instance_id, &TeacherId::from("t1"), scan_time)
            .unwrap();
        assert_eq!(outcome, ScanOutcome::Present);

        let err = engine
            .scan(&token.nonce, &instance_id, &TeacherId::from("t1"), scan_time)
            .unwrap_err();
        assert_eq!(err, crate::error::CoreError::TokenConsumed);
    }
}
