pub mod scan;
pub mod sweep;
pub mod token;

pub use scan::{scan as run_scan, GRACE_PERIOD};
pub use sweep::sweep_absences;
pub use token::{issue_attendance_token, TOKEN_TTL};
