//! Race manager: race creation and result entry for group races.

use super::models::{NewRace, NewRaceResult, Race, RaceId, RaceStatus, ResultEntry};
use crate::db::repository::{RaceRepository, RosterRepository};
use crate::roster::models::GroupId;
use crate::scoring::get_points;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Race errors
#[derive(Debug, Error)]
pub enum RaceError {
    #[error("Race not found: {0}")]
    RaceNotFound(RaceId),

    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Submitted players do not match this matchup")]
    PlayerMismatch,

    #[error("Duplicate finishing position: {0}")]
    DuplicatePosition(u32),

    #[error("Invalid finishing position: {0}")]
    InvalidPosition(u32),

    #[error("No results submitted")]
    EmptySubmission,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Creates races and records their results.
#[derive(Clone)]
pub struct RaceManager {
    roster: Arc<dyn RosterRepository>,
    races: Arc<dyn RaceRepository>,
}

impl RaceManager {
    /// Create a new race manager
    pub fn new(roster: Arc<dyn RosterRepository>, races: Arc<dyn RaceRepository>) -> Self {
        Self { roster, races }
    }

    /// Create a free-for-all race for a group on the given track.
    pub async fn create_race(
        &self,
        group_id: GroupId,
        track: &str,
        cup: &str,
    ) -> Result<Race, RaceError> {
        self.roster
            .get_group(group_id)
            .await?
            .ok_or(RaceError::GroupNotFound(group_id))?;

        let race = self
            .races
            .create_race(&NewRace {
                group_id,
                player1: None,
                player2: None,
                track: Some(track.to_string()),
                cup: Some(cup.to_string()),
            })
            .await?;
        Ok(race)
    }

    /// Record results for a race and mark it Complete.
    ///
    /// Existing results are replaced wholesale, so re-submitting corrected
    /// positions is safe. Returns the number of results recorded.
    pub async fn submit_results(
        &self,
        race_id: RaceId,
        entries: &[ResultEntry],
    ) -> Result<usize, RaceError> {
        let race = self
            .races
            .get_race(race_id)
            .await?
            .ok_or(RaceError::RaceNotFound(race_id))?;

        validate_entries(&race, entries)?;

        let results: Vec<NewRaceResult> = entries
            .iter()
            .map(|e| NewRaceResult {
                player_id: e.player_id,
                position: e.position,
                points: get_points(e.position),
            })
            .collect();

        self.races.replace_results(race_id, &results).await?;
        self.races.set_race_status(race_id, RaceStatus::Complete).await?;

        log::info!("Recorded {} results for race {}", results.len(), race_id);
        Ok(results.len())
    }
}

/// Boundary validation for a result submission.
fn validate_entries(race: &Race, entries: &[ResultEntry]) -> Result<(), RaceError> {
    if entries.is_empty() {
        return Err(RaceError::EmptySubmission);
    }

    // 1v1 matchups must be scored by exactly their two assigned players.
    if let (Some(p1), Some(p2)) = (race.player1, race.player2) {
        let expected = HashSet::from([p1, p2]);
        let submitted: HashSet<_> = entries.iter().map(|e| e.player_id).collect();
        if entries.len() != 2 || submitted != expected {
            return Err(RaceError::PlayerMismatch);
        }
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if !(1..=12).contains(&entry.position) {
            return Err(RaceError::InvalidPosition(entry.position));
        }
        if !seen.insert(entry.position) {
            return Err(RaceError::DuplicatePosition(entry.position));
        }
    }
    Ok(())
}
