//! Standings module: ranked per-group standings derived from completed
//! races.

pub mod manager;
pub mod models;

pub use manager::{StandingsError, StandingsManager, StandingsResult};
pub use models::Standing;
