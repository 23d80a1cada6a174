use super::RoomId;
use serde::{Deserialize, Serialize};

/// A physical classroom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl Classroom {
    pub fn satisfies_capacity(&self, min_capacity: u32) -> bool {
        self.capacity >= min_capacity
    }

    /// Bidirectional substring containment, per §4.3: a required token `r`
    /// is satisfied by an available token `e` iff `r` is a substring of `e`
    /// or `e` is a substring of `r`. Both sides are normalised first.
    pub fn satisfies_equipment(&self, required: &[String]) -> bool {
        required.iter().all(|r| {
            let r = super::Course::normalise_token(r);
            self.equipment.iter().any(|e| {
                let e = super::Course::normalise_token(e);
                e.contains(&r) || r.contains(&e)
            })
        })
    }
}
