//! Schedule module: round-robin matchup generation via the circle method.

pub mod manager;

pub use manager::{ScheduleError, ScheduleManager, ScheduleResult, circle_pairings};
