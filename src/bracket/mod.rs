//! Bracket module: seeded single-elimination bracket generation and winner
//! progression.
//!
//! This module covers:
//! - Advancer selection from group standings and rank-major seed
//!   interleaving
//! - Power-of-two bracket sizing and skeleton creation for every round
//! - Round-1 seeding with automatic bye resolution, cascaded through a
//!   worklist at generation time
//! - Winner propagation into the next round after each completed match
//!
//! ## Example
//!
//! ```no_run
//! use kart_league::bracket::BracketManager;
//! use kart_league::db::{Database, DatabaseConfig};
//! use kart_league::standings::StandingsManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let standings = StandingsManager::new(db.roster_repository(), db.race_repository());
//!     let brackets = BracketManager::new(
//!         db.roster_repository(),
//!         db.bracket_repository(),
//!         standings,
//!     );
//!
//!     // Top two of every group go through
//!     let summary = brackets.generate_bracket(1, 2).await?;
//!     println!(
//!         "bracket of {} over {} rounds",
//!         summary.bracket_size, summary.total_rounds
//!     );
//!     Ok(())
//! }
//! ```

pub mod manager;
pub mod models;
pub mod seeding;

pub use manager::{BracketError, BracketManager, BracketResult};
pub use models::{
    BracketMatch, BracketSlot, BracketSummary, MatchId, MatchStatus, SlotId, SlotOccupant,
};
