use super::CourseId;
use serde::{Deserialize, Serialize};

/// A course offering shared across every group that takes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub department: String,
    /// Number of distinct weekly slots this course must occupy, 1..=10.
    pub periods_per_week: u8,
    /// Minimum room capacity a section of this course requires.
    pub min_capacity: u32,
    /// Required equipment tokens, lowercase and trimmed (§4.3 containment).
    #[serde(default)]
    pub required_equipment: Vec<String>,
}

impl Course {
    /// Normalise an equipment token the way the contract requires:
    /// lowercase, whitespace-trimmed.
    pub fn normalise_token(token: &str) -> String {
        token.trim().to_lowercase()
    }
}
