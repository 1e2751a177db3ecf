//! Standings model.

use crate::roster::models::PlayerId;
use serde::{Deserialize, Serialize};

/// A player's ranked aggregation of points and race outcomes within one
/// group. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub player_name: String,
    /// Sum of points over the member's results in completed races
    pub total_points: u32,
    pub races_played: usize,
    /// Count of first-place finishes
    pub wins: usize,
    /// Completed races without a first-place finish
    pub losses: usize,
    /// Finishing positions in the order races completed
    pub positions: Vec<u32>,
}
