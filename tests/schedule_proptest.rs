/// Property-based tests for round-robin pairing generation using proptest
///
/// These tests verify that the circle method produces a complete, duplicate-
/// free set of pairings across a wide range of roster sizes.
use kart_league::schedule::circle_pairings;
use proptest::prelude::*;
use std::collections::HashSet;

// Strategy to generate a roster of distinct player ids
fn roster_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::hash_set(1i64..10_000, 2..=40)
        .prop_map(|ids| ids.into_iter().collect::<Vec<i64>>())
}

fn normalized(pairings: &[(i64, i64)]) -> Vec<(i64, i64)> {
    pairings.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect()
}

proptest! {
    #[test]
    fn test_pairing_count_is_n_choose_2(members in roster_strategy()) {
        let n = members.len();
        let pairings = circle_pairings(&members);
        prop_assert_eq!(pairings.len(), n * (n - 1) / 2);
    }

    #[test]
    fn test_no_player_meets_itself(members in roster_strategy()) {
        let pairings = circle_pairings(&members);
        prop_assert!(pairings.iter().all(|&(a, b)| a != b));
    }

    #[test]
    fn test_pairings_are_unique(members in roster_strategy()) {
        let pairings = circle_pairings(&members);
        let unique: HashSet<(i64, i64)> = normalized(&pairings).into_iter().collect();
        prop_assert_eq!(unique.len(), pairings.len(), "A pair must never repeat");
    }

    #[test]
    fn test_pairings_are_exhaustive(members in roster_strategy()) {
        let pairings = circle_pairings(&members);
        let covered: HashSet<(i64, i64)> = normalized(&pairings).into_iter().collect();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                prop_assert!(
                    covered.contains(&(a.min(b), a.max(b))),
                    "Pair {} vs {} is missing", a, b
                );
            }
        }
    }

    #[test]
    fn test_each_round_uses_a_player_once(members in roster_strategy()) {
        // The circle method emits rounds of floor(n/2) pairings back to
        // back; within one round every player appears at most once.
        let n = members.len();
        let per_round = n / 2;
        let pairings = circle_pairings(&members);
        for round in pairings.chunks(per_round.max(1)) {
            let mut seen = HashSet::new();
            for &(a, b) in round {
                prop_assert!(seen.insert(a), "Player {} raced twice in one round", a);
                prop_assert!(seen.insert(b), "Player {} raced twice in one round", b);
            }
        }
    }
}

#[test]
fn test_counts_for_small_rosters() {
    for n in 2..=9usize {
        let members: Vec<i64> = (1..=n as i64).collect();
        let pairings = circle_pairings(&members);
        assert_eq!(
            pairings.len(),
            n * (n - 1) / 2,
            "{n} members should race n*(n-1)/2 matchups"
        );
    }
}
