//! Roster manager for drawing players into tournament groups.

use super::models::{DrawSummary, PlayerId, TournamentId};
use crate::db::repository::RosterRepository;
use rand::seq::SliceRandom;
use std::sync::Arc;
use thiserror::Error;

/// Roster errors
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Insufficient players: need {needed}, have {current}")]
    InsufficientPlayers { needed: usize, current: usize },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RosterResult<T> = Result<T, RosterError>;

/// Draws the player pool into tournament groups.
#[derive(Clone)]
pub struct RosterManager {
    roster: Arc<dyn RosterRepository>,
}

impl RosterManager {
    /// Create a new roster manager
    pub fn new(roster: Arc<dyn RosterRepository>) -> Self {
        Self { roster }
    }

    /// Randomly distribute the player pool into groups of ideally 3-4.
    ///
    /// Groups that already have races are kept intact; only raceless groups
    /// are replaced. New groups are named alphabetically after the kept
    /// ones.
    pub async fn auto_draw(&self, tournament_id: TournamentId) -> RosterResult<DrawSummary> {
        self.roster
            .get_tournament(tournament_id)
            .await?
            .ok_or(RosterError::TournamentNotFound(tournament_id))?;

        let players = self.roster.list_players().await?;
        if players.len() < 2 {
            return Err(RosterError::InsufficientPlayers {
                needed: 2,
                current: players.len(),
            });
        }

        self.roster.delete_groups_without_races(tournament_id).await?;

        let mut pool: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        pool.shuffle(&mut rand::rng());

        let sizes = group_sizes(pool.len());
        let kept = self.roster.groups_for_tournament(tournament_id).await?.len();

        let mut offset = 0;
        for (i, &size) in sizes.iter().enumerate() {
            let name = group_name(kept + i);
            let group = self.roster.create_group(tournament_id, &name).await?;
            for &player_id in &pool[offset..offset + size] {
                self.roster.add_member(group.id, player_id).await?;
            }
            offset += size;
        }

        log::info!(
            "Drew {} players into {} groups for tournament {}",
            pool.len(),
            sizes.len(),
            tournament_id
        );

        Ok(DrawSummary {
            groups: sizes.len(),
            players: pool.len(),
        })
    }
}

/// Group sizes for `n` players, ideally 3-4 per group.
///
/// Starts from groups of four and reduces the group count while any group
/// would drop below three members.
fn group_sizes(n: usize) -> Vec<usize> {
    let mut num_groups = n.div_ceil(4);
    while num_groups > 1 && n / num_groups < 3 {
        num_groups -= 1;
    }

    let base = n / num_groups;
    let extra = n % num_groups;
    (0..num_groups)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}

/// Alphabetic group label: A, B, ..., Z, AA, AB, ...
fn group_name(index: usize) -> String {
    let mut n = index;
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    name
}
