//! Race module: group races and their result entry.
//!
//! Races come in two shapes: 1v1 matchups produced by the round-robin
//! scheduler, and free-for-all races an admin adds by hand with a track and
//! cup. Result submission validates at the boundary (players must match the
//! matchup, positions must be a set of distinct ranks) before anything is
//! written.

pub mod manager;
pub mod models;

pub use manager::{RaceError, RaceManager};
pub use models::{NewRace, NewRaceResult, Race, RaceId, RaceResult, RaceStatus, ResultEntry};
