//! Small in-memory dataset the demonstration binary runs against. Not a
//! fixture *format* — there is no persistence choice in this crate (core
//! depends only on [`timetable_core::Repository`]), so the demo simply
//! builds an [`InMemoryRepository`] directly rather than round-tripping
//! through a file format nobody else needs.

use chrono::{NaiveDate, NaiveTime};
use timetable_core::repository::InMemoryRepository;
use timetable_core::types::*;

pub fn demo_repository() -> InMemoryRepository {
    let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    let t = |h: u32, m: u32| NaiveTime::from_hms_opt(h, m, 0).unwrap();

    InMemoryRepository::new()
        .with_academic_year(AcademicYear {
            id: AcademicYearId::from("ay2025"),
            name: "2025-2026".to_string(),
            range: DateRange::new(d("2025-08-01"), d("2026-06-01")),
        })
        .with_session(Session {
            id: SessionId::from("fall2025"),
            academic_year_id: AcademicYearId::from("ay2025"),
            name: "Fall".to_string(),
            range: DateRange::new(d("2025-09-01"), d("2025-12-20")),
        })
        .with_slot(TimeSlot {
            id: SlotId::from("mon-0900"),
            weekday: Weekday::Monday,
            start: t(9, 0),
            end: t(10, 0),
            is_break: false,
        })
        .with_slot(TimeSlot {
            id: SlotId::from("mon-1015"),
            weekday: Weekday::Monday,
            start: t(10, 15),
            end: t(11, 15),
            is_break: false,
        })
        .with_slot(TimeSlot {
            id: SlotId::from("mon-1115"),
            weekday: Weekday::Monday,
            start: t(11, 15),
            end: t(11, 30),
            is_break: true,
        })
        .with_slot(TimeSlot {
            id: SlotId::from("tue-0900"),
            weekday: Weekday::Tuesday,
            start: t(9, 0),
            end: t(10, 0),
            is_break: false,
        })
        .with_course(Course {
            id: CourseId::from("math101"),
            name: "Algebra".to_string(),
            department: "math".to_string(),
            periods_per_week: 2,
            min_capacity: 20,
            required_equipment: vec!["whiteboard".to_string()],
        })
        .with_course(Course {
            id: CourseId::from("sci101"),
            name: "Biology".to_string(),
            department: "science".to_string(),
            periods_per_week: 1,
            min_capacity: 15,
            required_equipment: vec!["lab-bench".to_string()],
        })
        .with_teacher(Teacher {
            id: TeacherId::from("t-math"),
            name: "Ms. Novak".to_string(),
            department: "math".to_string(),
            qualifications: vec!["math".to_string()],
        })
        .with_teacher(Teacher {
            id: TeacherId::from("t-sci"),
            name: "Dr. Patel".to_string(),
            department: "science".to_string(),
            qualifications: vec!["science".to_string()],
        })
        .with_room(Classroom {
            id: RoomId::from("r-101"),
            name: "Room 101".to_string(),
            capacity: 30,
            equipment: vec!["smart-whiteboard".to_string()],
        })
        .with_room(Classroom {
            id: RoomId::from("r-lab"),
            name: "Science Lab".to_string(),
            capacity: 24,
            equipment: vec!["lab-bench".to_string(), "fume-hood".to_string()],
        })
        .with_group(StudentGroup {
            id: GroupId::from("grade10"),
            department: "math".to_string(),
            year: 10,
            semester: 1,
            courses: vec![CourseId::from("math101"), CourseId::from("sci101")],
        })
        .with_student(Student {
            id: StudentId::from("alice"),
            name: "Alice Johnson".to_string(),
            group_id: GroupId::from("grade10"),
        })
        .with_student(Student {
            id: StudentId::from("bob"),
            name: "Bob Smith".to_string(),
            group_id: GroupId::from("grade10"),
        })
}
