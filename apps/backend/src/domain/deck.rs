//! Deck construction and deterministic shuffling.

use serde::Serialize;

use crate::domain::rules::{Difficulty, CARD_SYMBOLS};

/// A single card on the board.
///
/// `id` is unique per card instance, not per pair; two cards of a pair
/// share `value` but never `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: u32,
    pub value: &'static str,
    pub is_flipped: bool,
    pub is_matched: bool,
}

/// Simple deterministic RNG for shuffling.
///
/// Uses a SplitMix64-style generator for good statistical properties while
/// remaining fast and deterministic given a seed.
struct SimpleLcg {
    state: u64,
}

impl SimpleLcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        // SplitMix64: well-distributed 64-bit generator.
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Compute largest multiple of m that fits in u64 to avoid modulo bias.
        // Values >= limit are discarded using rejection sampling.
        let limit = u64::MAX - (u64::MAX % m);

        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using deterministic RNG.
fn shuffle_with_seed(cards: &mut [Card], seed: u64) {
    let mut rng = SimpleLcg::new(seed);
    for i in (1..cards.len()).rev() {
        let j = rng.next_range(i + 1);
        cards.swap(i, j);
    }
}

/// Generate a shuffled deck for a difficulty level.
///
/// Produces `2 × total_pairs` cards: the first `total_pairs` catalog
/// symbols, each appearing exactly twice, with unique sequential ids
/// assigned before the shuffle. All cards start face down and unmatched.
///
/// Difficulty levels are fixed and bounded, so a pair count exceeding the
/// symbol catalog is a configuration error, not a runtime scenario.
pub fn generate_deck(difficulty: Difficulty, seed: u64) -> Vec<Card> {
    let pairs = difficulty.total_pairs();
    assert!(
        pairs <= CARD_SYMBOLS.len(),
        "difficulty requests {pairs} pairs but the symbol catalog holds {}",
        CARD_SYMBOLS.len()
    );

    let mut cards = Vec::with_capacity(pairs * 2);
    for (pair_no, symbol) in CARD_SYMBOLS.iter().copied().take(pairs).enumerate() {
        for copy in 0..2u32 {
            cards.push(Card {
                id: (pair_no as u32) * 2 + copy,
                value: symbol,
                is_flipped: false,
                is_matched: false,
            });
        }
    }

    shuffle_with_seed(&mut cards, seed);
    cards
}
