//! Bracket data models.

use crate::roster::models::{PlayerId, TournamentId};
use serde::{Deserialize, Serialize};

/// Bracket match ID type
pub type MatchId = i64;

/// Bracket slot ID type
pub type SlotId = i64;

/// Bracket match lifecycle status: Pending until results are recorded or a
/// bye is detected, then Complete (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Pending,
    Complete,
}

/// A single-elimination bracket match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-based round; the final is round `total_rounds`
    pub round: u32,
    /// 1-based position within the round
    pub match_number: u32,
    pub status: MatchStatus,
}

/// Occupancy of a bracket slot.
///
/// `Empty` is an intentional state: the slot is waiting on a feeder match
/// or sits opposite a bye. It is never confused with "not created yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotOccupant {
    Empty,
    Occupied(PlayerId),
}

impl SlotOccupant {
    /// The occupying player, if any.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::Occupied(id) => Some(*id),
            Self::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Option<PlayerId>> for SlotOccupant {
    fn from(value: Option<PlayerId>) -> Self {
        match value {
            Some(id) => Self::Occupied(id),
            None => Self::Empty,
        }
    }
}

/// One of the two player slots of a bracket match. Slot order within a
/// match is creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlot {
    pub id: SlotId,
    pub match_id: MatchId,
    pub occupant: SlotOccupant,
    /// Finishing position once results are in
    pub position: Option<u32>,
    /// Points for that position
    pub points: Option<u32>,
    /// Winner flag; only ever set, never cleared. Undoing an advancement
    /// means regenerating the bracket.
    pub advanced: bool,
}

/// Counts reported by bracket generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSummary {
    /// Power-of-two bracket capacity
    pub bracket_size: usize,
    /// log2 of the bracket size
    pub total_rounds: u32,
    /// Players actually seeded into round 1
    pub advancer_count: usize,
}
