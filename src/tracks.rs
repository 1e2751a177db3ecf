//! Track catalog and random track assignment.

use rand::seq::SliceRandom;
use serde::Serialize;

/// A track and the cup it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    pub name: &'static str,
    pub cup: &'static str,
}

/// Full track catalog, grouped by cup.
pub const TRACKS: &[TrackInfo] = &[
    // Mushroom Cup
    TrackInfo { name: "Mario Bros. Circuit", cup: "Mushroom Cup" },
    TrackInfo { name: "Crown City", cup: "Mushroom Cup" },
    TrackInfo { name: "Whistlestop Summit", cup: "Mushroom Cup" },
    TrackInfo { name: "DK Spaceport", cup: "Mushroom Cup" },
    // Flower Cup
    TrackInfo { name: "Desert Hills", cup: "Flower Cup" },
    TrackInfo { name: "Shy Guy Bazaar", cup: "Flower Cup" },
    TrackInfo { name: "Wario Stadium", cup: "Flower Cup" },
    TrackInfo { name: "Airship Fortress", cup: "Flower Cup" },
    // Star Cup
    TrackInfo { name: "DK Pass", cup: "Star Cup" },
    TrackInfo { name: "Starview Peak", cup: "Star Cup" },
    TrackInfo { name: "Sky-High Sundae", cup: "Star Cup" },
    TrackInfo { name: "Wario's Galleon", cup: "Star Cup" },
    // Shell Cup
    TrackInfo { name: "Koopa Troopa Beach", cup: "Shell Cup" },
    TrackInfo { name: "Faraway Oasis", cup: "Shell Cup" },
    TrackInfo { name: "Peach Stadium", cup: "Shell Cup" },
    // Banana Cup
    TrackInfo { name: "Peach Beach", cup: "Banana Cup" },
    TrackInfo { name: "Salty Salty Speedway", cup: "Banana Cup" },
    TrackInfo { name: "Dino Dino Jungle", cup: "Banana Cup" },
    TrackInfo { name: "Great ? Block Ruins", cup: "Banana Cup" },
    // Leaf Cup
    TrackInfo { name: "Cheep Cheep Falls", cup: "Leaf Cup" },
    TrackInfo { name: "Dandelion Depths", cup: "Leaf Cup" },
    TrackInfo { name: "Boo Cinema", cup: "Leaf Cup" },
    TrackInfo { name: "Dry Bones Burnout", cup: "Leaf Cup" },
    // Lightning Cup
    TrackInfo { name: "Moo Moo Meadows", cup: "Lightning Cup" },
    TrackInfo { name: "Choco Mountain", cup: "Lightning Cup" },
    TrackInfo { name: "Toad's Factory", cup: "Lightning Cup" },
    TrackInfo { name: "Bowser's Castle", cup: "Lightning Cup" },
    // Special Cup
    TrackInfo { name: "Acorn Heights", cup: "Special Cup" },
    TrackInfo { name: "Mario Circuit", cup: "Special Cup" },
    TrackInfo { name: "Rainbow Road", cup: "Special Cup" },
];

/// Randomly assigned tracks for `n` races.
///
/// Shuffles the full catalog and cycles through it when `n` exceeds the
/// catalog size.
pub fn assign_tracks(n: usize) -> Vec<TrackInfo> {
    let mut pool: Vec<TrackInfo> = TRACKS.to_vec();
    pool.shuffle(&mut rand::rng());
    (0..n).map(|i| pool[i % pool.len()]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let names: HashSet<&str> = TRACKS.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), TRACKS.len(), "Track names should be unique");
    }

    #[test]
    fn test_assign_fewer_than_catalog() {
        let assigned = assign_tracks(10);
        assert_eq!(assigned.len(), 10);

        // No repeats until the catalog is exhausted
        let names: HashSet<&str> = assigned.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_assign_cycles_past_catalog() {
        let assigned = assign_tracks(TRACKS.len() + 5);
        assert_eq!(assigned.len(), TRACKS.len() + 5);

        // The cycle repeats the shuffled order
        for i in 0..5 {
            assert_eq!(assigned[i], assigned[TRACKS.len() + i]);
        }
    }

    #[test]
    fn test_assign_zero() {
        assert!(assign_tracks(0).is_empty());
    }
}
