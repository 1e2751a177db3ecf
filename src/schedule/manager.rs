//! Round-robin schedule generation for group play.

use crate::db::repository::{RaceRepository, RosterRepository};
use crate::race::models::NewRace;
use crate::roster::models::{GroupId, PlayerId};
use std::sync::Arc;
use thiserror::Error;

/// Schedule errors
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Insufficient players: need {needed}, have {current}")]
    InsufficientPlayers { needed: usize, current: usize },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Generates the round-robin matchup schedule for a group.
#[derive(Clone)]
pub struct ScheduleManager {
    roster: Arc<dyn RosterRepository>,
    races: Arc<dyn RaceRepository>,
}

impl ScheduleManager {
    /// Create a new schedule manager
    pub fn new(roster: Arc<dyn RosterRepository>, races: Arc<dyn RaceRepository>) -> Self {
        Self { roster, races }
    }

    /// Generate the full round-robin schedule for a group and return the
    /// number of matchups created.
    ///
    /// Only the group's Pending races are replaced; Complete races and
    /// their results are preserved, so regeneration is safe after roster
    /// changes mid-stage. New matchups start Pending with no track or cup
    /// assigned.
    pub async fn generate_round_robin(&self, group_id: GroupId) -> ScheduleResult<usize> {
        self.roster
            .get_group(group_id)
            .await?
            .ok_or(ScheduleError::GroupNotFound(group_id))?;

        let members = self.roster.members_for_group(group_id).await?;
        if members.len() < 2 {
            return Err(ScheduleError::InsufficientPlayers {
                needed: 2,
                current: members.len(),
            });
        }

        let ids: Vec<PlayerId> = members.iter().map(|m| m.player_id).collect();
        let pairings = circle_pairings(&ids);

        self.races.delete_pending_races(group_id).await?;
        for &(player1, player2) in &pairings {
            self.races
                .create_race(&NewRace {
                    group_id,
                    player1: Some(player1),
                    player2: Some(player2),
                    track: None,
                    cup: None,
                })
                .await?;
        }

        log::info!(
            "Generated {} round-robin races for group {}",
            pairings.len(),
            group_id
        );
        Ok(pairings.len())
    }
}

/// All pairwise matchups for the given members, by the circle method.
///
/// The first member is a fixed anchor; the rest form a ring that rotates
/// one step per round. Odd-sized fields get a bye placeholder whose
/// pairings are skipped. The output covers every unordered pair exactly
/// once: n*(n-1)/2 matchups for n members.
pub fn circle_pairings(members: &[PlayerId]) -> Vec<(PlayerId, PlayerId)> {
    let mut ring: Vec<Option<PlayerId>> = members.iter().copied().map(Some).collect();
    if ring.len() % 2 != 0 {
        ring.push(None);
    }

    let m = ring.len();
    let mut pairings = Vec::with_capacity(members.len() * members.len().saturating_sub(1) / 2);
    for _ in 0..m.saturating_sub(1) {
        for i in 0..m / 2 {
            if let (Some(a), Some(b)) = (ring[i], ring[m - 1 - i]) {
                pairings.push((a, b));
            }
        }
        // Rotate the ring behind the anchor at index 0.
        if let Some(last) = ring.pop() {
            ring.insert(1, last);
        }
    }
    pairings
}
