use proptest::prelude::*;

use crate::domain::deck::generate_deck;
use crate::domain::rules::{Difficulty, CARD_SYMBOLS};

fn any_difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

proptest! {
    /// The shuffle is a permutation: for any seed, the deck holds exactly
    /// the unshuffled pair list as a multiset, with ids 0..2n.
    #[test]
    fn deck_is_a_permutation_of_the_pair_list(
        seed in any::<u64>(),
        difficulty in any_difficulty(),
    ) {
        let deck = generate_deck(difficulty, seed);
        let pairs = difficulty.total_pairs();
        prop_assert_eq!(deck.len(), pairs * 2);

        let mut ids: Vec<u32> = deck.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        let expected_ids: Vec<u32> = (0..(pairs * 2) as u32).collect();
        prop_assert_eq!(ids, expected_ids);

        let mut values: Vec<&str> = deck.iter().map(|c| c.value).collect();
        values.sort_unstable();
        let mut expected: Vec<&str> = CARD_SYMBOLS
            .iter()
            .take(pairs)
            .flat_map(|s| [*s, *s])
            .collect();
        expected.sort_unstable();
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn shuffling_is_deterministic_per_seed(seed in any::<u64>()) {
        let a = generate_deck(Difficulty::Medium, seed);
        let b = generate_deck(Difficulty::Medium, seed);
        prop_assert_eq!(a, b);
    }
}
