//! Roster data models: tournaments, players, groups, and memberships.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tournament ID type
pub type TournamentId = i64;

/// Player ID type
pub type PlayerId = i64;

/// Group ID type
pub type GroupId = i64;

/// A tournament: the umbrella for its groups, races, and bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    /// Tournament ID
    pub id: TournamentId,
    /// Display name
    pub name: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// A registered player. Immutable within this crate; player CRUD lives with
/// the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Player ID
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// A group within a tournament's group stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Group ID
    pub id: GroupId,
    /// Owning tournament
    pub tournament_id: TournamentId,
    /// Group label ("A", "B", ...)
    pub name: String,
}

/// Membership of a player in a group. Set-like: a player appears in a group
/// at most once. Enumeration order is insertion order and is what standings
/// fall back to on equal points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub group_id: GroupId,
    pub player_id: PlayerId,
    pub player_name: String,
}

/// Summary returned by an automatic group draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawSummary {
    /// Number of groups created by the draw
    pub groups: usize,
    /// Number of players distributed
    pub players: usize,
}
