//! # Kart League
//!
//! Tournament-progression engine for a kart racing league: ranked group
//! standings, round-robin race schedules, and a seeded single-elimination
//! bracket that advances winners automatically, byes included.
//!
//! This crate is the algorithmic core of the league. It owns no wire
//! protocol, CLI, or HTTP surface; an application layer calls the managers
//! here, and an authorization gate in that layer is assumed to run before
//! any mutating call. Persistence goes through the repository traits in
//! [`db::repository`], with PostgreSQL implementations provided.
//!
//! ## Flow
//!
//! Players are drawn into groups ([`roster`]), each group plays a generated
//! round-robin schedule ([`schedule`]), completed races roll up into ranked
//! standings ([`standings`]), and the top finishers of every group seed the
//! elimination bracket ([`bracket`]), which resolves byes on creation and
//! propagates winners round to round as results come in ([`race`] and
//! bracket result entry feed it).
//!
//! Each operation is a single logical unit of work; the caller serializes
//! mutating operations per group or tournament. Multi-step writes are not
//! wrapped in one transaction at this layer — regeneration after a crash is
//! the repair path.
//!
//! ## Example
//!
//! ```no_run
//! use kart_league::db::{Database, DatabaseConfig};
//! use kart_league::schedule::ScheduleManager;
//! use kart_league::standings::StandingsManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!
//!     let schedule = ScheduleManager::new(db.roster_repository(), db.race_repository());
//!     let races = schedule.generate_round_robin(1).await?;
//!     println!("scheduled {races} matchups");
//!
//!     let standings = StandingsManager::new(db.roster_repository(), db.race_repository());
//!     for standing in standings.get_group_standings(1).await? {
//!         println!("{}: {} pts", standing.player_name, standing.total_points);
//!     }
//!     Ok(())
//! }
//! ```

/// Single-elimination bracket generation and winner progression.
pub mod bracket;
pub use bracket::{BracketManager, BracketSummary, MatchStatus, SlotOccupant};

/// Connection pooling, configuration, and the repository seam.
pub mod db;

/// Group races and their result entry.
pub mod race;
pub use race::{RaceManager, RaceStatus, ResultEntry};

/// Tournaments, players, groups, and the automatic group draw.
pub mod roster;
pub use roster::{Player, PlayerId, RosterManager, TournamentId};

/// Round-robin matchup generation.
pub mod schedule;
pub use schedule::ScheduleManager;

/// Position-to-points scoring.
pub mod scoring;
pub use scoring::get_points;

/// Ranked per-group standings.
pub mod standings;
pub use standings::{Standing, StandingsManager};

/// Track catalog and random track assignment.
pub mod tracks;
pub use tracks::{TRACKS, TrackInfo, assign_tracks};
