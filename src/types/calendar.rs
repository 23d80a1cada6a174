use super::{AcademicYearId, HolidayId, SessionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Iterate every date in the range in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let mut cursor = self.start;
        std::iter::from_fn(move || {
            if cursor >= self.end {
                None
            } else {
                let d = cursor;
                cursor = cursor.succ_opt().expect("date overflow");
                Some(d)
            }
        })
    }
}

/// An academic year; at most one is active at any given date (enforced by
/// repository data, not the core).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicYear {
    pub id: AcademicYearId,
    pub name: String,
    pub range: DateRange,
}

/// A session partitioning its academic year (e.g. fall/spring terms).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub academic_year_id: AcademicYearId,
    pub name: String,
    pub range: DateRange,
}

/// A holiday blocking instance generation within an academic year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    pub id: HolidayId,
    pub academic_year_id: AcademicYearId,
    pub name: String,
    pub range: DateRange,
}
