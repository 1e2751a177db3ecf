//! Bracket manager: builds the elimination bracket from group standings and
//! advances winners round to round.

use super::models::{
    BracketMatch, BracketSlot, BracketSummary, MatchId, MatchStatus, SlotOccupant,
};
use super::seeding;
use crate::db::repository::{BracketRepository, RosterRepository};
use crate::race::models::ResultEntry;
use crate::roster::models::{PlayerId, TournamentId};
use crate::scoring::get_points;
use crate::standings::manager::{StandingsError, StandingsManager};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use thiserror::Error;

/// Bracket errors
#[derive(Debug, Error)]
pub enum BracketError {
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Insufficient advancers: need {needed}, have {current}")]
    InsufficientAdvancers { needed: usize, current: usize },

    #[error("Player {0} has no slot in match {1}")]
    PlayerNotInMatch(PlayerId, MatchId),

    #[error("Duplicate finishing position: {0}")]
    DuplicatePosition(u32),

    #[error("Invalid finishing position: {0}")]
    InvalidPosition(u32),

    #[error("No results submitted")]
    EmptySubmission,

    #[error("Standings error: {0}")]
    Standings(#[from] StandingsError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type BracketResult<T> = Result<T, BracketError>;

/// Builds and progresses the single-elimination bracket of a tournament.
#[derive(Clone)]
pub struct BracketManager {
    roster: Arc<dyn RosterRepository>,
    bracket: Arc<dyn BracketRepository>,
    standings: StandingsManager,
}

impl BracketManager {
    /// Create a new bracket manager
    pub fn new(
        roster: Arc<dyn RosterRepository>,
        bracket: Arc<dyn BracketRepository>,
        standings: StandingsManager,
    ) -> Self {
        Self {
            roster,
            bracket,
            standings,
        }
    }

    /// Build the elimination bracket for a tournament from its group
    /// standings, taking the top `advance_count` finishers per group.
    ///
    /// Destructive: any existing bracket is deleted and rebuilt; this is
    /// never a merge. Byes are resolved immediately, cascading into later
    /// rounds where a winner can already be determined.
    pub async fn generate_bracket(
        &self,
        tournament_id: TournamentId,
        advance_count: usize,
    ) -> BracketResult<BracketSummary> {
        self.roster
            .get_tournament(tournament_id)
            .await?
            .ok_or(BracketError::TournamentNotFound(tournament_id))?;

        // Top finishers per group, in group enumeration order.
        let groups = self.roster.groups_for_tournament(tournament_id).await?;
        let mut group_tops = Vec::with_capacity(groups.len());
        for group in &groups {
            let standings = self.standings.get_group_standings(group.id).await?;
            let top: Vec<PlayerId> = standings
                .iter()
                .take(advance_count)
                .map(|s| s.player_id)
                .collect();
            group_tops.push(top);
        }

        let advancers = seeding::interleave_advancers(&group_tops);
        if advancers.len() < 2 {
            return Err(BracketError::InsufficientAdvancers {
                needed: 2,
                current: advancers.len(),
            });
        }

        let bracket_size = seeding::bracket_size_for(advancers.len());
        let total_rounds = seeding::total_rounds_for(bracket_size);

        // Full regeneration: the previous bracket goes away wholesale.
        self.bracket.delete_bracket(tournament_id).await?;

        let seeded = seeding::round_one_slots(&advancers, bracket_size);
        let mut round_one = Vec::with_capacity(seeded.len());
        for (index, occupants) in seeded.iter().enumerate() {
            let created = self
                .bracket
                .create_match(tournament_id, 1, index as u32 + 1)
                .await?;
            for &occupant in occupants {
                self.bracket.create_slot(created.id, occupant).await?;
            }
            round_one.push(created.id);
        }
        for round in 2..=total_rounds {
            let matches_in_round = bracket_size >> round;
            for number in 1..=matches_in_round {
                let created = self
                    .bracket
                    .create_match(tournament_id, round, number as u32)
                    .await?;
                self.bracket.create_slot(created.id, SlotOccupant::Empty).await?;
                self.bracket.create_slot(created.id, SlotOccupant::Empty).await?;
            }
        }

        self.resolve_byes(round_one).await?;

        log::info!(
            "Generated bracket for tournament {}: {} advancers, size {}, {} rounds",
            tournament_id,
            advancers.len(),
            bracket_size,
            total_rounds
        );

        Ok(BracketSummary {
            bracket_size,
            total_rounds,
            advancer_count: advancers.len(),
        })
    }

    /// Propagate a completed match's winner into its slot in the next
    /// round.
    ///
    /// A match with no recorded winner is a defensive no-op, as is the
    /// final, which has no successor match.
    pub async fn advance_winner(&self, match_id: MatchId) -> BracketResult<()> {
        let bracket_match = self
            .bracket
            .get_match(match_id)
            .await?
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let slots = self.bracket.slots_for_match(match_id).await?;

        let winner = slots
            .iter()
            .find(|s| s.advanced)
            .and_then(|s| s.occupant.player());
        let Some(winner) = winner else {
            log::warn!("advance_winner called on match {} with no recorded winner", match_id);
            return Ok(());
        };

        self.advance_into_next(&bracket_match, winner).await?;
        Ok(())
    }

    /// Record results for a bracket match: positions and points per named
    /// occupant, winner flagged on position 1, match completed, winner
    /// advanced into the next round.
    pub async fn record_match_results(
        &self,
        match_id: MatchId,
        entries: &[ResultEntry],
    ) -> BracketResult<()> {
        self.bracket
            .get_match(match_id)
            .await?
            .ok_or(BracketError::MatchNotFound(match_id))?;
        let slots = self.bracket.slots_for_match(match_id).await?;

        if entries.is_empty() {
            return Err(BracketError::EmptySubmission);
        }
        let mut seen = HashSet::new();
        for entry in entries {
            if !(1..=12).contains(&entry.position) {
                return Err(BracketError::InvalidPosition(entry.position));
            }
            if !seen.insert(entry.position) {
                return Err(BracketError::DuplicatePosition(entry.position));
            }
            if !slots
                .iter()
                .any(|s| s.occupant.player() == Some(entry.player_id))
            {
                return Err(BracketError::PlayerNotInMatch(entry.player_id, match_id));
            }
        }

        for entry in entries {
            let slot = slots
                .iter()
                .find(|s| s.occupant.player() == Some(entry.player_id));
            if let Some(slot) = slot {
                self.bracket
                    .record_slot_result(
                        slot.id,
                        entry.position,
                        get_points(entry.position),
                        entry.position == 1,
                    )
                    .await?;
            }
        }
        self.bracket
            .set_match_status(match_id, MatchStatus::Complete)
            .await?;

        self.advance_winner(match_id).await
    }

    /// Drain the bye worklist. Every queued match is checked; a resolved
    /// bye pushes its successor back on, so a winner cascades as far up the
    /// bracket as it can at generation time.
    async fn resolve_byes(&self, seed_matches: Vec<MatchId>) -> BracketResult<()> {
        let mut worklist: VecDeque<MatchId> = seed_matches.into();
        while let Some(match_id) = worklist.pop_front() {
            let Some(bracket_match) = self.bracket.get_match(match_id).await? else {
                continue;
            };
            if bracket_match.status != MatchStatus::Pending {
                continue;
            }

            let slots = self.bracket.slots_for_match(match_id).await?;
            let Some(lone) = lone_occupant(&slots) else {
                continue;
            };
            let Some(winner) = lone.occupant.player() else {
                continue;
            };
            let lone_id = lone.id;
            if !self.empty_slot_is_dead(&bracket_match, &slots).await? {
                continue;
            }

            self.bracket.mark_slot_advanced(lone_id).await?;
            self.bracket
                .set_match_status(match_id, MatchStatus::Complete)
                .await?;
            log::debug!(
                "Bye: round {} match {} completed without play",
                bracket_match.round,
                bracket_match.match_number
            );

            if let Some(next_id) = self.advance_into_next(&bracket_match, winner).await? {
                worklist.push_back(next_id);
            }
        }
        Ok(())
    }

    /// Write `winner` into its slot in the next round, leaving the sibling
    /// slot untouched. Returns the successor match id, or `None` when the
    /// match was the final.
    async fn advance_into_next(
        &self,
        bracket_match: &BracketMatch,
        winner: PlayerId,
    ) -> BracketResult<Option<MatchId>> {
        let next_round = bracket_match.round + 1;
        let next_number = seeding::next_match_number(bracket_match.match_number);
        let Some(next_match) = self
            .bracket
            .find_match(bracket_match.tournament_id, next_round, next_number)
            .await?
        else {
            // The final has no successor; the result stands as-is.
            return Ok(None);
        };

        let slots = self.bracket.slots_for_match(next_match.id).await?;
        let index = seeding::next_slot_index(bracket_match.match_number);
        if let Some(slot) = slots.get(index) {
            self.bracket.set_slot_occupant(slot.id, winner).await?;
            log::debug!(
                "Advanced player {} into round {} match {} slot {}",
                winner,
                next_round,
                next_number,
                index
            );
        }
        Ok(Some(next_match.id))
    }

    /// Whether the empty slot of a one-occupant match can no longer be fed.
    /// Round-1 slots have no feeder; later slots are dead once their feeder
    /// match completed without delivering an occupant.
    async fn empty_slot_is_dead(
        &self,
        bracket_match: &BracketMatch,
        slots: &[BracketSlot],
    ) -> BracketResult<bool> {
        if bracket_match.round == 1 {
            return Ok(true);
        }
        let Some(empty_index) = slots.iter().position(|s| s.occupant.is_empty()) else {
            return Ok(false);
        };
        let feeder_number = seeding::feeder_match_number(bracket_match.match_number, empty_index);
        let feeder = self
            .bracket
            .find_match(bracket_match.tournament_id, bracket_match.round - 1, feeder_number)
            .await?;
        Ok(match feeder {
            Some(f) => f.status == MatchStatus::Complete,
            None => true,
        })
    }
}

/// The single occupied slot of a match, if exactly one slot is occupied.
fn lone_occupant(slots: &[BracketSlot]) -> Option<&BracketSlot> {
    let mut occupied = slots.iter().filter(|s| !s.occupant.is_empty());
    match (occupied.next(), occupied.next()) {
        (Some(slot), None) => Some(slot),
        _ => None,
    }
}
