//! Race data models.

use crate::roster::models::{GroupId, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Race ID type
pub type RaceId = i64;

/// Race lifecycle status: Pending until results are recorded, then Complete
/// (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceStatus {
    Pending,
    Complete,
}

/// A race within a group: a scheduled 1v1 matchup (round robin) when both
/// players are set, a free-for-all when neither is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub group_id: GroupId,
    /// First seat of a 1v1 matchup; `None` for free-for-all races.
    pub player1: Option<PlayerId>,
    /// Second seat of a 1v1 matchup; `None` for free-for-all races.
    pub player2: Option<PlayerId>,
    pub status: RaceStatus,
    pub track: Option<String>,
    pub cup: Option<String>,
    /// Set when the race transitions to Complete; standings read positions
    /// in completion order.
    pub completed_at: Option<DateTime<Utc>>,
}

/// A race to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRace {
    pub group_id: GroupId,
    pub player1: Option<PlayerId>,
    pub player2: Option<PlayerId>,
    pub track: Option<String>,
    pub cup: Option<String>,
}

/// A player's recorded finish in one race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub id: i64,
    pub race_id: RaceId,
    pub player_id: PlayerId,
    pub position: u32,
    pub points: u32,
}

/// A finish to be persisted; points are derived from the position before it
/// gets here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRaceResult {
    pub player_id: PlayerId,
    pub position: u32,
    pub points: u32,
}

/// One submitted finishing position, validated at the boundary before it
/// reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub player_id: PlayerId,
    pub position: u32,
}
