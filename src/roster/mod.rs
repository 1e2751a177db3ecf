//! Roster module: tournaments, players, groups, and the automatic group
//! draw.
//!
//! Group and member setup is normally driven by an admin surface outside
//! this crate; what lives here is the data model plus the one piece of
//! setup with actual logic, the random draw of the player pool into groups
//! of ideally 3-4.

pub mod manager;
pub mod models;

pub use manager::{RosterError, RosterManager, RosterResult};
pub use models::{
    DrawSummary, Group, GroupId, GroupMember, Player, PlayerId, Tournament, TournamentId,
};
