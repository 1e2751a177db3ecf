//! Standings calculator: aggregates completed race results into ranked
//! group standings.

use super::models::Standing;
use crate::db::repository::{RaceRepository, RosterRepository};
use crate::roster::models::GroupId;
use std::sync::Arc;
use thiserror::Error;

/// Standings errors
#[derive(Debug, Error)]
pub enum StandingsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StandingsResult<T> = Result<T, StandingsError>;

/// Computes ranked standings for a group.
#[derive(Clone)]
pub struct StandingsManager {
    roster: Arc<dyn RosterRepository>,
    races: Arc<dyn RaceRepository>,
}

impl StandingsManager {
    /// Create a new standings manager
    pub fn new(roster: Arc<dyn RosterRepository>, races: Arc<dyn RaceRepository>) -> Self {
        Self { roster, races }
    }

    /// Ranked standings for a group, descending by total points.
    ///
    /// Entries on equal points keep the original member enumeration order;
    /// there is no secondary tie-break. A group with no completed races
    /// yields every member with all-zero statistics, and an unknown or
    /// empty group yields an empty list.
    pub async fn get_group_standings(&self, group_id: GroupId) -> StandingsResult<Vec<Standing>> {
        let members = self.roster.members_for_group(group_id).await?;
        let results = self.races.completed_results_for_group(group_id).await?;

        let mut standings: Vec<Standing> = members
            .into_iter()
            .map(|member| {
                let positions: Vec<u32> = results
                    .iter()
                    .filter(|r| r.player_id == member.player_id)
                    .map(|r| r.position)
                    .collect();
                let total_points = results
                    .iter()
                    .filter(|r| r.player_id == member.player_id)
                    .map(|r| r.points)
                    .sum();
                let wins = positions.iter().filter(|&&p| p == 1).count();

                Standing {
                    player_id: member.player_id,
                    player_name: member.player_name,
                    total_points,
                    races_played: positions.len(),
                    wins,
                    losses: positions.len() - wins,
                    positions,
                }
            })
            .collect();

        // Stable sort: ties keep member enumeration order.
        standings.sort_by(|a, b| b.total_points.cmp(&a.total_points));
        Ok(standings)
    }
}
