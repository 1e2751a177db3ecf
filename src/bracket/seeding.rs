//! Pure seeding and indexing math for single-elimination brackets.
//!
//! Everything here is deterministic and storage-free; the manager applies
//! these layouts against the repository.

use super::models::SlotOccupant;
use crate::roster::models::PlayerId;

/// Interleave per-group advancers rank-major: all rank-0 advancers in group
/// order, then all rank-1, and so on. Same-group finishers end up as far
/// apart in the seed sequence as the group count allows, so they meet as
/// late as the bracket structure permits.
pub fn interleave_advancers(group_tops: &[Vec<PlayerId>]) -> Vec<PlayerId> {
    let deepest = group_tops.iter().map(Vec::len).max().unwrap_or(0);
    let mut advancers = Vec::with_capacity(group_tops.iter().map(Vec::len).sum());
    for rank in 0..deepest {
        for tops in group_tops {
            if let Some(&player) = tops.get(rank) {
                advancers.push(player);
            }
        }
    }
    advancers
}

/// Smallest power of two that fits `count` entrants.
pub fn bracket_size_for(count: usize) -> usize {
    count.next_power_of_two()
}

/// Number of rounds for a power-of-two bracket size.
pub fn total_rounds_for(bracket_size: usize) -> u32 {
    bracket_size.trailing_zeros()
}

/// Round-1 slot assignments, two per match in sequence order.
///
/// Fully paired matches come first; once the remaining advancers can no
/// longer fill a match, they are spread one per match so unfilled capacity
/// always surfaces as resolvable single-occupant byes, never as unplayable
/// zero-occupant matches.
pub fn round_one_slots(advancers: &[PlayerId], bracket_size: usize) -> Vec<[SlotOccupant; 2]> {
    let match_count = bracket_size / 2;
    // Every advancer beyond one-per-match can be paired up.
    let paired_matches = advancers.len().saturating_sub(match_count);

    let mut slots = Vec::with_capacity(match_count);
    let mut next = advancers.iter().copied();
    for index in 0..match_count {
        let first: SlotOccupant = next.next().into();
        let second: SlotOccupant = if index < paired_matches {
            next.next().into()
        } else {
            SlotOccupant::Empty
        };
        slots.push([first, second]);
    }
    slots
}

/// Match number in the next round fed by the given match.
pub fn next_match_number(match_number: u32) -> u32 {
    match_number.div_ceil(2)
}

/// Slot index in the next-round match: odd match numbers feed slot 0, even
/// match numbers feed slot 1.
pub fn next_slot_index(match_number: u32) -> usize {
    ((match_number - 1) % 2) as usize
}

/// Match number in the previous round that feeds the given slot. Inverse of
/// [`next_match_number`] and [`next_slot_index`].
pub fn feeder_match_number(match_number: u32, slot_index: usize) -> u32 {
    2 * match_number - 1 + slot_index as u32
}
