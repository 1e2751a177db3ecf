//! Repository trait definitions for testability and dependency injection.
//!
//! This module provides trait-based abstractions over database operations,
//! enabling better testing through mock implementations and dependency
//! injection. Every manager takes these traits instead of a pool, and the
//! PostgreSQL implementations below are the production wiring.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::bracket::models::{BracketMatch, BracketSlot, MatchId, MatchStatus, SlotId, SlotOccupant};
use crate::race::models::{NewRace, NewRaceResult, Race, RaceId, RaceResult, RaceStatus};
use crate::roster::models::{
    Group, GroupId, GroupMember, Player, PlayerId, Tournament, TournamentId,
};

/// Trait for tournament, group, and membership operations
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Find tournament by ID
    async fn get_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> sqlx::Result<Option<Tournament>>;

    /// Find group by ID
    async fn get_group(&self, group_id: GroupId) -> sqlx::Result<Option<Group>>;

    /// Groups of a tournament, in enumeration order
    async fn groups_for_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> sqlx::Result<Vec<Group>>;

    /// Members of a group, in enumeration order
    async fn members_for_group(&self, group_id: GroupId) -> sqlx::Result<Vec<GroupMember>>;

    /// All registered players
    async fn list_players(&self) -> sqlx::Result<Vec<Player>>;

    /// Create a group in a tournament
    async fn create_group(&self, tournament_id: TournamentId, name: &str) -> sqlx::Result<Group>;

    /// Add a player to a group
    async fn add_member(&self, group_id: GroupId, player_id: PlayerId) -> sqlx::Result<()>;

    /// Delete a tournament's groups that have no races, memberships
    /// included. Returns the number of groups removed.
    async fn delete_groups_without_races(
        &self,
        tournament_id: TournamentId,
    ) -> sqlx::Result<u64>;
}

/// Trait for race and race-result operations
#[async_trait]
pub trait RaceRepository: Send + Sync {
    /// Find race by ID
    async fn get_race(&self, race_id: RaceId) -> sqlx::Result<Option<Race>>;

    /// Races of a group, optionally filtered by status
    async fn races_for_group(
        &self,
        group_id: GroupId,
        status: Option<RaceStatus>,
    ) -> sqlx::Result<Vec<Race>>;

    /// Create a race
    async fn create_race(&self, race: &NewRace) -> sqlx::Result<Race>;

    /// Delete a group's Pending races. Returns the number removed.
    async fn delete_pending_races(&self, group_id: GroupId) -> sqlx::Result<u64>;

    /// Set a race's status, stamping the completion time when it turns
    /// Complete
    async fn set_race_status(&self, race_id: RaceId, status: RaceStatus) -> sqlx::Result<()>;

    /// Replace a race's results wholesale. Returns the number inserted.
    async fn replace_results(
        &self,
        race_id: RaceId,
        results: &[NewRaceResult],
    ) -> sqlx::Result<usize>;

    /// Results of a group's Complete races, ordered by race completion
    async fn completed_results_for_group(
        &self,
        group_id: GroupId,
    ) -> sqlx::Result<Vec<RaceResult>>;
}

/// Trait for bracket match and slot operations
#[async_trait]
pub trait BracketRepository: Send + Sync {
    /// Delete a tournament's entire bracket, slots included. Returns the
    /// number of matches removed.
    async fn delete_bracket(&self, tournament_id: TournamentId) -> sqlx::Result<u64>;

    /// Create a Pending match
    async fn create_match(
        &self,
        tournament_id: TournamentId,
        round: u32,
        match_number: u32,
    ) -> sqlx::Result<BracketMatch>;

    /// Create a slot for a match; slot order within a match is creation
    /// order
    async fn create_slot(
        &self,
        match_id: MatchId,
        occupant: SlotOccupant,
    ) -> sqlx::Result<BracketSlot>;

    /// Find match by ID
    async fn get_match(&self, match_id: MatchId) -> sqlx::Result<Option<BracketMatch>>;

    /// Find the unique match at (tournament, round, match number)
    async fn find_match(
        &self,
        tournament_id: TournamentId,
        round: u32,
        match_number: u32,
    ) -> sqlx::Result<Option<BracketMatch>>;

    /// Slots of a match, in creation order
    async fn slots_for_match(&self, match_id: MatchId) -> sqlx::Result<Vec<BracketSlot>>;

    /// Put a player into a slot
    async fn set_slot_occupant(&self, slot_id: SlotId, player_id: PlayerId) -> sqlx::Result<()>;

    /// Record a slot's finishing position, points, and advanced flag
    async fn record_slot_result(
        &self,
        slot_id: SlotId,
        position: u32,
        points: u32,
        advanced: bool,
    ) -> sqlx::Result<()>;

    /// Flag a slot's occupant as the winner
    async fn mark_slot_advanced(&self, slot_id: SlotId) -> sqlx::Result<()>;

    /// Set a match's status
    async fn set_match_status(&self, match_id: MatchId, status: MatchStatus) -> sqlx::Result<()>;

    /// All matches of a tournament, ordered by round then match number
    async fn matches_for_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> sqlx::Result<Vec<BracketMatch>>;
}

fn race_status_str(status: RaceStatus) -> &'static str {
    match status {
        RaceStatus::Pending => "pending",
        RaceStatus::Complete => "complete",
    }
}

fn parse_race_status(value: &str) -> RaceStatus {
    match value {
        "complete" => RaceStatus::Complete,
        _ => RaceStatus::Pending,
    }
}

fn match_status_str(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Pending => "pending",
        MatchStatus::Complete => "complete",
    }
}

fn parse_match_status(value: &str) -> MatchStatus {
    match value {
        "complete" => MatchStatus::Complete,
        _ => MatchStatus::Pending,
    }
}

fn map_race(row: &PgRow) -> Race {
    Race {
        id: row.get("id"),
        group_id: row.get("group_id"),
        player1: row.get("player1_id"),
        player2: row.get("player2_id"),
        status: parse_race_status(&row.get::<String, _>("status")),
        track: row.get("track"),
        cup: row.get("cup"),
        completed_at: row
            .get::<Option<chrono::NaiveDateTime>, _>("completed_at")
            .map(|dt| dt.and_utc()),
    }
}

fn map_match(row: &PgRow) -> BracketMatch {
    BracketMatch {
        id: row.get("id"),
        tournament_id: row.get("tournament_id"),
        round: row.get::<i32, _>("round") as u32,
        match_number: row.get::<i32, _>("match_number") as u32,
        status: parse_match_status(&row.get::<String, _>("status")),
    }
}

fn map_slot(row: &PgRow) -> BracketSlot {
    BracketSlot {
        id: row.get("id"),
        match_id: row.get("match_id"),
        occupant: SlotOccupant::from(row.get::<Option<PlayerId>, _>("player_id")),
        position: row.get::<Option<i32>, _>("position").map(|p| p as u32),
        points: row.get::<Option<i32>, _>("points").map(|p| p as u32),
        advanced: row.get("advanced"),
    }
}

/// Default PostgreSQL implementation of `RosterRepository`
pub struct PgRosterRepository {
    pool: PgPool,
}

impl PgRosterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterRepository for PgRosterRepository {
    async fn get_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> sqlx::Result<Option<Tournament>> {
        let row = sqlx::query("SELECT id, name, created_at FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Tournament {
            id: r.get("id"),
            name: r.get("name"),
            created_at: r.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        }))
    }

    async fn get_group(&self, group_id: GroupId) -> sqlx::Result<Option<Group>> {
        let row = sqlx::query(
            "SELECT id, tournament_id, name FROM tournament_groups WHERE id = $1",
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Group {
            id: r.get("id"),
            tournament_id: r.get("tournament_id"),
            name: r.get("name"),
        }))
    }

    async fn groups_for_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> sqlx::Result<Vec<Group>> {
        let rows = sqlx::query(
            "SELECT id, tournament_id, name FROM tournament_groups
             WHERE tournament_id = $1 ORDER BY id",
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Group {
                id: r.get("id"),
                tournament_id: r.get("tournament_id"),
                name: r.get("name"),
            })
            .collect())
    }

    async fn members_for_group(&self, group_id: GroupId) -> sqlx::Result<Vec<GroupMember>> {
        // Enumeration order is insertion order; standings rely on it for
        // tie-breaking.
        let rows = sqlx::query(
            "SELECT gm.group_id, gm.player_id, p.name AS player_name
             FROM group_members gm
             JOIN players p ON p.id = gm.player_id
             WHERE gm.group_id = $1
             ORDER BY gm.id",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| GroupMember {
                group_id: r.get("group_id"),
                player_id: r.get("player_id"),
                player_name: r.get("player_name"),
            })
            .collect())
    }

    async fn list_players(&self) -> sqlx::Result<Vec<Player>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM players ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Player {
                id: r.get("id"),
                name: r.get("name"),
                created_at: r.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            })
            .collect())
    }

    async fn create_group(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> sqlx::Result<Group> {
        let row = sqlx::query(
            "INSERT INTO tournament_groups (tournament_id, name) VALUES ($1, $2) RETURNING id",
        )
        .bind(tournament_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(Group {
            id: row.get("id"),
            tournament_id,
            name: name.to_string(),
        })
    }

    async fn add_member(&self, group_id: GroupId, player_id: PlayerId) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO group_members (group_id, player_id) VALUES ($1, $2)")
            .bind(group_id)
            .bind(player_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_groups_without_races(
        &self,
        tournament_id: TournamentId,
    ) -> sqlx::Result<u64> {
        sqlx::query(
            "DELETE FROM group_members WHERE group_id IN (
                 SELECT g.id FROM tournament_groups g
                 WHERE g.tournament_id = $1
                   AND NOT EXISTS (SELECT 1 FROM races r WHERE r.group_id = g.id)
             )",
        )
        .bind(tournament_id)
        .execute(&self.pool)
        .await?;

        let result = sqlx::query(
            "DELETE FROM tournament_groups g
             WHERE g.tournament_id = $1
               AND NOT EXISTS (SELECT 1 FROM races r WHERE r.group_id = g.id)",
        )
        .bind(tournament_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Default PostgreSQL implementation of `RaceRepository`
pub struct PgRaceRepository {
    pool: PgPool,
}

impl PgRaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RaceRepository for PgRaceRepository {
    async fn get_race(&self, race_id: RaceId) -> sqlx::Result<Option<Race>> {
        let row = sqlx::query(
            "SELECT id, group_id, player1_id, player2_id, status, track, cup, completed_at
             FROM races WHERE id = $1",
        )
        .bind(race_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| map_race(&r)))
    }

    async fn races_for_group(
        &self,
        group_id: GroupId,
        status: Option<RaceStatus>,
    ) -> sqlx::Result<Vec<Race>> {
        let query = if let Some(status) = status {
            sqlx::query(
                "SELECT id, group_id, player1_id, player2_id, status, track, cup, completed_at
                 FROM races WHERE group_id = $1 AND status = $2 ORDER BY id",
            )
            .bind(group_id)
            .bind(race_status_str(status))
        } else {
            sqlx::query(
                "SELECT id, group_id, player1_id, player2_id, status, track, cup, completed_at
                 FROM races WHERE group_id = $1 ORDER BY id",
            )
            .bind(group_id)
        };

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(map_race).collect())
    }

    async fn create_race(&self, race: &NewRace) -> sqlx::Result<Race> {
        let row = sqlx::query(
            "INSERT INTO races (group_id, player1_id, player2_id, status, track, cup)
             VALUES ($1, $2, $3, 'pending', $4, $5)
             RETURNING id, group_id, player1_id, player2_id, status, track, cup, completed_at",
        )
        .bind(race.group_id)
        .bind(race.player1)
        .bind(race.player2)
        .bind(&race.track)
        .bind(&race.cup)
        .fetch_one(&self.pool)
        .await?;

        Ok(map_race(&row))
    }

    async fn delete_pending_races(&self, group_id: GroupId) -> sqlx::Result<u64> {
        sqlx::query(
            "DELETE FROM race_results WHERE race_id IN (
                 SELECT id FROM races WHERE group_id = $1 AND status = 'pending'
             )",
        )
        .bind(group_id)
        .execute(&self.pool)
        .await?;

        let result = sqlx::query("DELETE FROM races WHERE group_id = $1 AND status = 'pending'")
            .bind(group_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn set_race_status(&self, race_id: RaceId, status: RaceStatus) -> sqlx::Result<()> {
        sqlx::query(
            "UPDATE races
             SET status = $1,
                 completed_at = CASE WHEN $1 = 'complete' THEN NOW() ELSE NULL END
             WHERE id = $2",
        )
        .bind(race_status_str(status))
        .bind(race_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn replace_results(
        &self,
        race_id: RaceId,
        results: &[NewRaceResult],
    ) -> sqlx::Result<usize> {
        sqlx::query("DELETE FROM race_results WHERE race_id = $1")
            .bind(race_id)
            .execute(&self.pool)
            .await?;

        for result in results {
            sqlx::query(
                "INSERT INTO race_results (race_id, player_id, position, points)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(race_id)
            .bind(result.player_id)
            .bind(result.position as i32)
            .bind(result.points as i32)
            .execute(&self.pool)
            .await?;
        }

        Ok(results.len())
    }

    async fn completed_results_for_group(
        &self,
        group_id: GroupId,
    ) -> sqlx::Result<Vec<RaceResult>> {
        let rows = sqlx::query(
            "SELECT rr.id, rr.race_id, rr.player_id, rr.position, rr.points
             FROM race_results rr
             JOIN races r ON r.id = rr.race_id
             WHERE r.group_id = $1 AND r.status = 'complete'
             ORDER BY r.completed_at ASC NULLS LAST, rr.id ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RaceResult {
                id: r.get("id"),
                race_id: r.get("race_id"),
                player_id: r.get("player_id"),
                position: r.get::<i32, _>("position") as u32,
                points: r.get::<i32, _>("points") as u32,
            })
            .collect())
    }
}

/// Default PostgreSQL implementation of `BracketRepository`
pub struct PgBracketRepository {
    pool: PgPool,
}

impl PgBracketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BracketRepository for PgBracketRepository {
    async fn delete_bracket(&self, tournament_id: TournamentId) -> sqlx::Result<u64> {
        sqlx::query(
            "DELETE FROM bracket_slots WHERE match_id IN (
                 SELECT id FROM bracket_matches WHERE tournament_id = $1
             )",
        )
        .bind(tournament_id)
        .execute(&self.pool)
        .await?;

        let result = sqlx::query("DELETE FROM bracket_matches WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn create_match(
        &self,
        tournament_id: TournamentId,
        round: u32,
        match_number: u32,
    ) -> sqlx::Result<BracketMatch> {
        let row = sqlx::query(
            "INSERT INTO bracket_matches (tournament_id, round, match_number, status)
             VALUES ($1, $2, $3, 'pending')
             RETURNING id",
        )
        .bind(tournament_id)
        .bind(round as i32)
        .bind(match_number as i32)
        .fetch_one(&self.pool)
        .await?;

        Ok(BracketMatch {
            id: row.get("id"),
            tournament_id,
            round,
            match_number,
            status: MatchStatus::Pending,
        })
    }

    async fn create_slot(
        &self,
        match_id: MatchId,
        occupant: SlotOccupant,
    ) -> sqlx::Result<BracketSlot> {
        let row = sqlx::query(
            "INSERT INTO bracket_slots (match_id, player_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(match_id)
        .bind(occupant.player())
        .fetch_one(&self.pool)
        .await?;

        Ok(BracketSlot {
            id: row.get("id"),
            match_id,
            occupant,
            position: None,
            points: None,
            advanced: false,
        })
    }

    async fn get_match(&self, match_id: MatchId) -> sqlx::Result<Option<BracketMatch>> {
        let row = sqlx::query(
            "SELECT id, tournament_id, round, match_number, status
             FROM bracket_matches WHERE id = $1",
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| map_match(&r)))
    }

    async fn find_match(
        &self,
        tournament_id: TournamentId,
        round: u32,
        match_number: u32,
    ) -> sqlx::Result<Option<BracketMatch>> {
        let row = sqlx::query(
            "SELECT id, tournament_id, round, match_number, status
             FROM bracket_matches
             WHERE tournament_id = $1 AND round = $2 AND match_number = $3",
        )
        .bind(tournament_id)
        .bind(round as i32)
        .bind(match_number as i32)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| map_match(&r)))
    }

    async fn slots_for_match(&self, match_id: MatchId) -> sqlx::Result<Vec<BracketSlot>> {
        let rows = sqlx::query(
            "SELECT id, match_id, player_id, position, points, advanced
             FROM bracket_slots WHERE match_id = $1 ORDER BY id",
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_slot).collect())
    }

    async fn set_slot_occupant(&self, slot_id: SlotId, player_id: PlayerId) -> sqlx::Result<()> {
        sqlx::query("UPDATE bracket_slots SET player_id = $1 WHERE id = $2")
            .bind(player_id)
            .bind(slot_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn record_slot_result(
        &self,
        slot_id: SlotId,
        position: u32,
        points: u32,
        advanced: bool,
    ) -> sqlx::Result<()> {
        sqlx::query(
            "UPDATE bracket_slots SET position = $1, points = $2, advanced = $3 WHERE id = $4",
        )
        .bind(position as i32)
        .bind(points as i32)
        .bind(advanced)
        .bind(slot_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_slot_advanced(&self, slot_id: SlotId) -> sqlx::Result<()> {
        sqlx::query("UPDATE bracket_slots SET advanced = TRUE WHERE id = $1")
            .bind(slot_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_match_status(&self, match_id: MatchId, status: MatchStatus) -> sqlx::Result<()> {
        sqlx::query("UPDATE bracket_matches SET status = $1 WHERE id = $2")
            .bind(match_status_str(status))
            .bind(match_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn matches_for_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> sqlx::Result<Vec<BracketMatch>> {
        let rows = sqlx::query(
            "SELECT id, tournament_id, round, match_number, status
             FROM bracket_matches
             WHERE tournament_id = $1
             ORDER BY round, match_number",
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_match).collect())
    }
}

/// In-memory mock store for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        tournaments: Vec<Tournament>,
        players: Vec<Player>,
        groups: Vec<Group>,
        members: Vec<GroupMember>,
        races: Vec<Race>,
        results: Vec<RaceResult>,
        matches: Vec<BracketMatch>,
        slots: Vec<BracketSlot>,
        next_id: i64,
    }

    impl State {
        fn alloc_id(&mut self) -> i64 {
            self.next_id += 1;
            self.next_id
        }
    }

    /// One in-memory store implementing every repository trait, so a single
    /// instance can back all managers in a test.
    #[derive(Default)]
    pub struct MemoryStore {
        state: Mutex<State>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed_tournament(&self, name: &str) -> TournamentId {
            let mut state = self.state.lock().unwrap();
            let id = state.alloc_id();
            state.tournaments.push(Tournament {
                id,
                name: name.to_string(),
                created_at: Utc::now(),
            });
            id
        }

        pub fn seed_player(&self, name: &str) -> PlayerId {
            let mut state = self.state.lock().unwrap();
            let id = state.alloc_id();
            state.players.push(Player {
                id,
                name: name.to_string(),
                created_at: Utc::now(),
            });
            id
        }

        pub fn seed_group(&self, tournament_id: TournamentId, name: &str) -> GroupId {
            let mut state = self.state.lock().unwrap();
            let id = state.alloc_id();
            state.groups.push(Group {
                id,
                tournament_id,
                name: name.to_string(),
            });
            id
        }

        pub fn seed_member(&self, group_id: GroupId, player_id: PlayerId) {
            let mut state = self.state.lock().unwrap();
            let player_name = state
                .players
                .iter()
                .find(|p| p.id == player_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            state.members.push(GroupMember {
                group_id,
                player_id,
                player_name,
            });
        }

        /// Bare Pending race with no players or track, enough to mark a
        /// group as played-in.
        pub fn seed_race(&self, group_id: GroupId) -> RaceId {
            let mut state = self.state.lock().unwrap();
            let id = state.alloc_id();
            state.races.push(Race {
                id,
                group_id,
                player1: None,
                player2: None,
                status: RaceStatus::Pending,
                track: None,
                cup: None,
                completed_at: None,
            });
            id
        }

        /// Pending 1v1 matchup between two players.
        pub fn seed_matchup(&self, group_id: GroupId, p1: PlayerId, p2: PlayerId) -> RaceId {
            let mut state = self.state.lock().unwrap();
            let id = state.alloc_id();
            state.races.push(Race {
                id,
                group_id,
                player1: Some(p1),
                player2: Some(p2),
                status: RaceStatus::Pending,
                track: None,
                cup: None,
                completed_at: None,
            });
            id
        }
    }

    #[async_trait]
    impl RosterRepository for MemoryStore {
        async fn get_tournament(
            &self,
            tournament_id: TournamentId,
        ) -> sqlx::Result<Option<Tournament>> {
            let state = self.state.lock().unwrap();
            Ok(state.tournaments.iter().find(|t| t.id == tournament_id).cloned())
        }

        async fn get_group(&self, group_id: GroupId) -> sqlx::Result<Option<Group>> {
            let state = self.state.lock().unwrap();
            Ok(state.groups.iter().find(|g| g.id == group_id).cloned())
        }

        async fn groups_for_tournament(
            &self,
            tournament_id: TournamentId,
        ) -> sqlx::Result<Vec<Group>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .groups
                .iter()
                .filter(|g| g.tournament_id == tournament_id)
                .cloned()
                .collect())
        }

        async fn members_for_group(&self, group_id: GroupId) -> sqlx::Result<Vec<GroupMember>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .members
                .iter()
                .filter(|m| m.group_id == group_id)
                .cloned()
                .collect())
        }

        async fn list_players(&self) -> sqlx::Result<Vec<Player>> {
            let state = self.state.lock().unwrap();
            Ok(state.players.clone())
        }

        async fn create_group(
            &self,
            tournament_id: TournamentId,
            name: &str,
        ) -> sqlx::Result<Group> {
            let mut state = self.state.lock().unwrap();
            let id = state.alloc_id();
            let group = Group {
                id,
                tournament_id,
                name: name.to_string(),
            };
            state.groups.push(group.clone());
            Ok(group)
        }

        async fn add_member(&self, group_id: GroupId, player_id: PlayerId) -> sqlx::Result<()> {
            let mut state = self.state.lock().unwrap();
            let player_name = state
                .players
                .iter()
                .find(|p| p.id == player_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            state.members.push(GroupMember {
                group_id,
                player_id,
                player_name,
            });
            Ok(())
        }

        async fn delete_groups_without_races(
            &self,
            tournament_id: TournamentId,
        ) -> sqlx::Result<u64> {
            let mut state = self.state.lock().unwrap();
            let played: HashSet<GroupId> = state.races.iter().map(|r| r.group_id).collect();
            let doomed: HashSet<GroupId> = state
                .groups
                .iter()
                .filter(|g| g.tournament_id == tournament_id && !played.contains(&g.id))
                .map(|g| g.id)
                .collect();
            state.groups.retain(|g| !doomed.contains(&g.id));
            state.members.retain(|m| !doomed.contains(&m.group_id));
            Ok(doomed.len() as u64)
        }
    }

    #[async_trait]
    impl RaceRepository for MemoryStore {
        async fn get_race(&self, race_id: RaceId) -> sqlx::Result<Option<Race>> {
            let state = self.state.lock().unwrap();
            Ok(state.races.iter().find(|r| r.id == race_id).cloned())
        }

        async fn races_for_group(
            &self,
            group_id: GroupId,
            status: Option<RaceStatus>,
        ) -> sqlx::Result<Vec<Race>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .races
                .iter()
                .filter(|r| r.group_id == group_id && status.is_none_or(|s| r.status == s))
                .cloned()
                .collect())
        }

        async fn create_race(&self, race: &NewRace) -> sqlx::Result<Race> {
            let mut state = self.state.lock().unwrap();
            let id = state.alloc_id();
            let race = Race {
                id,
                group_id: race.group_id,
                player1: race.player1,
                player2: race.player2,
                status: RaceStatus::Pending,
                track: race.track.clone(),
                cup: race.cup.clone(),
                completed_at: None,
            };
            state.races.push(race.clone());
            Ok(race)
        }

        async fn delete_pending_races(&self, group_id: GroupId) -> sqlx::Result<u64> {
            let mut state = self.state.lock().unwrap();
            let doomed: HashSet<RaceId> = state
                .races
                .iter()
                .filter(|r| r.group_id == group_id && r.status == RaceStatus::Pending)
                .map(|r| r.id)
                .collect();
            state.races.retain(|r| !doomed.contains(&r.id));
            state.results.retain(|res| !doomed.contains(&res.race_id));
            Ok(doomed.len() as u64)
        }

        async fn set_race_status(&self, race_id: RaceId, status: RaceStatus) -> sqlx::Result<()> {
            let mut state = self.state.lock().unwrap();
            if let Some(race) = state.races.iter_mut().find(|r| r.id == race_id) {
                race.status = status;
                race.completed_at = match status {
                    RaceStatus::Complete => Some(Utc::now()),
                    RaceStatus::Pending => None,
                };
            }
            Ok(())
        }

        async fn replace_results(
            &self,
            race_id: RaceId,
            results: &[NewRaceResult],
        ) -> sqlx::Result<usize> {
            let mut state = self.state.lock().unwrap();
            state.results.retain(|r| r.race_id != race_id);
            for result in results {
                let id = state.alloc_id();
                state.results.push(RaceResult {
                    id,
                    race_id,
                    player_id: result.player_id,
                    position: result.position,
                    points: result.points,
                });
            }
            Ok(results.len())
        }

        async fn completed_results_for_group(
            &self,
            group_id: GroupId,
        ) -> sqlx::Result<Vec<RaceResult>> {
            let state = self.state.lock().unwrap();
            let mut completed: Vec<&Race> = state
                .races
                .iter()
                .filter(|r| r.group_id == group_id && r.status == RaceStatus::Complete)
                .collect();
            completed.sort_by_key(|r| (r.completed_at, r.id));

            let mut out = Vec::new();
            for race in completed {
                let mut results: Vec<RaceResult> = state
                    .results
                    .iter()
                    .filter(|res| res.race_id == race.id)
                    .cloned()
                    .collect();
                results.sort_by_key(|res| res.id);
                out.extend(results);
            }
            Ok(out)
        }
    }

    #[async_trait]
    impl BracketRepository for MemoryStore {
        async fn delete_bracket(&self, tournament_id: TournamentId) -> sqlx::Result<u64> {
            let mut state = self.state.lock().unwrap();
            let doomed: HashSet<MatchId> = state
                .matches
                .iter()
                .filter(|m| m.tournament_id == tournament_id)
                .map(|m| m.id)
                .collect();
            state.matches.retain(|m| !doomed.contains(&m.id));
            state.slots.retain(|s| !doomed.contains(&s.match_id));
            Ok(doomed.len() as u64)
        }

        async fn create_match(
            &self,
            tournament_id: TournamentId,
            round: u32,
            match_number: u32,
        ) -> sqlx::Result<BracketMatch> {
            let mut state = self.state.lock().unwrap();
            let id = state.alloc_id();
            let bracket_match = BracketMatch {
                id,
                tournament_id,
                round,
                match_number,
                status: MatchStatus::Pending,
            };
            state.matches.push(bracket_match.clone());
            Ok(bracket_match)
        }

        async fn create_slot(
            &self,
            match_id: MatchId,
            occupant: SlotOccupant,
        ) -> sqlx::Result<BracketSlot> {
            let mut state = self.state.lock().unwrap();
            let id = state.alloc_id();
            let slot = BracketSlot {
                id,
                match_id,
                occupant,
                position: None,
                points: None,
                advanced: false,
            };
            state.slots.push(slot.clone());
            Ok(slot)
        }

        async fn get_match(&self, match_id: MatchId) -> sqlx::Result<Option<BracketMatch>> {
            let state = self.state.lock().unwrap();
            Ok(state.matches.iter().find(|m| m.id == match_id).cloned())
        }

        async fn find_match(
            &self,
            tournament_id: TournamentId,
            round: u32,
            match_number: u32,
        ) -> sqlx::Result<Option<BracketMatch>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .matches
                .iter()
                .find(|m| {
                    m.tournament_id == tournament_id
                        && m.round == round
                        && m.match_number == match_number
                })
                .cloned())
        }

        async fn slots_for_match(&self, match_id: MatchId) -> sqlx::Result<Vec<BracketSlot>> {
            let state = self.state.lock().unwrap();
            let mut slots: Vec<BracketSlot> = state
                .slots
                .iter()
                .filter(|s| s.match_id == match_id)
                .cloned()
                .collect();
            slots.sort_by_key(|s| s.id);
            Ok(slots)
        }

        async fn set_slot_occupant(
            &self,
            slot_id: SlotId,
            player_id: PlayerId,
        ) -> sqlx::Result<()> {
            let mut state = self.state.lock().unwrap();
            if let Some(slot) = state.slots.iter_mut().find(|s| s.id == slot_id) {
                slot.occupant = SlotOccupant::Occupied(player_id);
            }
            Ok(())
        }

        async fn record_slot_result(
            &self,
            slot_id: SlotId,
            position: u32,
            points: u32,
            advanced: bool,
        ) -> sqlx::Result<()> {
            let mut state = self.state.lock().unwrap();
            if let Some(slot) = state.slots.iter_mut().find(|s| s.id == slot_id) {
                slot.position = Some(position);
                slot.points = Some(points);
                slot.advanced = advanced;
            }
            Ok(())
        }

        async fn mark_slot_advanced(&self, slot_id: SlotId) -> sqlx::Result<()> {
            let mut state = self.state.lock().unwrap();
            if let Some(slot) = state.slots.iter_mut().find(|s| s.id == slot_id) {
                slot.advanced = true;
            }
            Ok(())
        }

        async fn set_match_status(
            &self,
            match_id: MatchId,
            status: MatchStatus,
        ) -> sqlx::Result<()> {
            let mut state = self.state.lock().unwrap();
            if let Some(bracket_match) = state.matches.iter_mut().find(|m| m.id == match_id) {
                bracket_match.status = status;
            }
            Ok(())
        }

        async fn matches_for_tournament(
            &self,
            tournament_id: TournamentId,
        ) -> sqlx::Result<Vec<BracketMatch>> {
            let state = self.state.lock().unwrap();
            let mut matches: Vec<BracketMatch> = state
                .matches
                .iter()
                .filter(|m| m.tournament_id == tournament_id)
                .cloned()
                .collect();
            matches.sort_by_key(|m| (m.round, m.match_number));
            Ok(matches)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_ids_are_unique() {
            let store = MemoryStore::new();
            let t = store.seed_tournament("t");
            let p = store.seed_player("p");
            let g = store.seed_group(t, "A");
            assert!(t < p && p < g, "IDs should be allocated in order");
        }

        #[tokio::test]
        async fn test_mock_member_names_resolve() {
            let store = MemoryStore::new();
            let t = store.seed_tournament("t");
            let g = store.seed_group(t, "A");
            let p = store.seed_player("Daisy");
            store.seed_member(g, p);

            let members = store.members_for_group(g).await.unwrap();
            assert_eq!(members.len(), 1);
            assert_eq!(members[0].player_name, "Daisy");
        }

        #[tokio::test]
        async fn test_mock_delete_groups_without_races() {
            let store = MemoryStore::new();
            let t = store.seed_tournament("t");
            let empty = store.seed_group(t, "A");
            let played = store.seed_group(t, "B");
            store.seed_race(played);

            let removed = store.delete_groups_without_races(t).await.unwrap();
            assert_eq!(removed, 1);

            let groups = store.groups_for_tournament(t).await.unwrap();
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].id, played);
            assert!(store.get_group(empty).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_mock_completed_results_follow_completion_order() {
            let store = MemoryStore::new();
            let t = store.seed_tournament("t");
            let g = store.seed_group(t, "A");
            let p = store.seed_player("p");

            let first = store.seed_race(g);
            let second = store.seed_race(g);

            // Complete in reverse creation order
            store
                .replace_results(second, &[NewRaceResult { player_id: p, position: 2, points: 12 }])
                .await
                .unwrap();
            store.set_race_status(second, RaceStatus::Complete).await.unwrap();
            store
                .replace_results(first, &[NewRaceResult { player_id: p, position: 1, points: 15 }])
                .await
                .unwrap();
            store.set_race_status(first, RaceStatus::Complete).await.unwrap();

            let results = store.completed_results_for_group(g).await.unwrap();
            assert_eq!(results.len(), 2);
            assert_eq!(
                results[0].race_id, second,
                "Results follow completion order, not creation order"
            );
            assert_eq!(results[1].race_id, first);
        }
    }
}
