use std::collections::HashMap;

use crate::domain::deck::generate_deck;
use crate::domain::rules::{Difficulty, CARD_SYMBOLS};

#[test]
fn deck_has_two_of_each_symbol_for_every_difficulty() {
    for difficulty in Difficulty::ALL {
        let deck = generate_deck(difficulty, 42);
        let pairs = difficulty.total_pairs();
        assert_eq!(deck.len(), pairs * 2);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for card in &deck {
            *counts.entry(card.value).or_default() += 1;
        }
        assert_eq!(counts.len(), pairs, "{difficulty:?}: distinct symbols");
        assert!(
            counts.values().all(|&n| n == 2),
            "{difficulty:?}: every symbol appears exactly twice"
        );
    }
}

#[test]
fn ids_are_unique_and_sequential_before_shuffling() {
    for difficulty in Difficulty::ALL {
        let deck = generate_deck(difficulty, 7);
        let mut ids: Vec<u32> = deck.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        let expected: Vec<u32> = (0..deck.len() as u32).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn all_cards_start_face_down_and_unmatched() {
    let deck = generate_deck(Difficulty::Medium, 1);
    assert!(deck.iter().all(|c| !c.is_flipped && !c.is_matched));
}

#[test]
fn same_seed_reproduces_the_same_order() {
    let a = generate_deck(Difficulty::Easy, 123);
    let b = generate_deck(Difficulty::Easy, 123);
    assert_eq!(a, b);
}

#[test]
fn different_seeds_permute_differently() {
    // Not guaranteed for arbitrary seed pairs, but stable for these two.
    let a = generate_deck(Difficulty::Hard, 1);
    let b = generate_deck(Difficulty::Hard, 2);
    assert_ne!(a, b);
}

#[test]
fn hard_uses_the_entire_catalog() {
    let deck = generate_deck(Difficulty::Hard, 9);
    let mut values: Vec<&str> = deck.iter().map(|c| c.value).collect();
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), CARD_SYMBOLS.len());
}

#[test]
fn difficulty_table_matches_grid_invariant() {
    for difficulty in Difficulty::ALL {
        assert_eq!(
            difficulty.total_pairs(),
            difficulty.grid_size() * difficulty.grid_size() / 2
        );
    }
    assert_eq!(Difficulty::Easy.total_pairs(), 8);
    assert_eq!(Difficulty::Medium.total_pairs(), 18);
    assert_eq!(Difficulty::Hard.total_pairs(), 32);
}
