mod assignment;
mod attendance;
mod calendar;
mod course;
mod group;
mod ids;
mod instance;
mod room;
mod slot;
mod teacher;

pub use assignment::*;
pub use attendance::*;
pub use calendar::*;
pub use course::*;
pub use group::*;
pub use ids::*;
pub use instance::*;
pub use room::*;
pub use slot::*;
pub use teacher::*;
