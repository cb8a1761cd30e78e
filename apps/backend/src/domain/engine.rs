//! Headless flip/match engine.
//!
//! The board is a single state object mutated only through the transition
//! functions below, so the round state machine
//! (`0 flipped → 1 flipped → 2 flipped (pending) → 0 flipped`) can be
//! driven and audited without a UI. Deferred work — the match/mismatch
//! reveal and the 1-second clock — is owned by the game as explicit
//! pending state: the host schedules the delay, then calls
//! [`MatchGame::resolve_pending`] / [`MatchGame::tick_second`], and
//! [`MatchGame::reset`] drops anything still pending so nothing fires
//! against a board that no longer exists.

use std::time::Duration;

use serde::Serialize;

use crate::domain::deck::{generate_deck, Card};
use crate::domain::rules::Difficulty;
use crate::domain::scoring::calculate_score;

/// How long a matched pair stays highlighted before the round clears.
pub const MATCH_REVEAL_DELAY: Duration = Duration::from_millis(500);

/// How long a mismatched pair stays face up before flipping back.
/// Longer than the match delay so the player can memorize both cards.
pub const MISMATCH_REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// What happened to the pair that closed a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Matched,
    Mismatched,
}

impl Resolution {
    /// Display delay the host should wait before calling
    /// [`MatchGame::resolve_pending`].
    pub fn reveal_delay(self) -> Duration {
        match self {
            Resolution::Matched => MATCH_REVEAL_DELAY,
            Resolution::Mismatched => MISMATCH_REVEAL_DELAY,
        }
    }
}

/// A scheduled two-card resolution waiting for its reveal delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingResolution {
    resolution: Resolution,
    first: u32,
    second: u32,
}

/// Outcome of a flip attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The click was rejected: resolution pending, game over, or the card
    /// is ineligible (already face up, matched, or unknown).
    Ignored,
    /// First card of a round turned face up.
    Flipped,
    /// Second card turned face up; the round is closed and a resolution
    /// is now pending. `moves` has been incremented.
    RoundClosed(Resolution),
}

/// Result of one play-through, as submitted to the session ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub difficulty: Difficulty,
    pub score: i32,
    pub time_seconds: u32,
    pub moves: u32,
    pub completed: bool,
}

/// One memory game, from first flip to completion.
#[derive(Debug, Clone)]
pub struct MatchGame {
    difficulty: Difficulty,
    cards: Vec<Card>,
    /// Ids of the face-up, not-yet-resolved cards; at most two.
    flipped: Vec<u32>,
    pending: Option<PendingResolution>,
    matched_pairs: usize,
    moves: u32,
    time_seconds: u32,
    started: bool,
    completed: bool,
}

impl MatchGame {
    /// Deal a new board with a caller-supplied shuffle seed.
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            cards: generate_deck(difficulty, seed),
            flipped: Vec::with_capacity(2),
            pending: None,
            matched_pairs: 0,
            moves: 0,
            time_seconds: 0,
            started: false,
            completed: false,
        }
    }

    /// Deal a new board with a randomly drawn shuffle seed.
    pub fn with_random_seed(difficulty: Difficulty) -> Self {
        use rand::Rng;
        Self::new(difficulty, rand::rng().random())
    }

    /// Attempt to flip the card with `card_id`.
    ///
    /// No-ops while a resolution is pending, after completion, when two
    /// cards are already face up, and on face-up/matched/unknown cards.
    /// The second flip of a round counts one move and schedules the
    /// round's resolution; a move is a pair of flips, never a single one.
    pub fn flip(&mut self, card_id: u32) -> FlipOutcome {
        if self.pending.is_some() || self.completed || self.flipped.len() >= 2 {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.cards.iter_mut().find(|c| c.id == card_id) else {
            return FlipOutcome::Ignored;
        };
        if card.is_flipped || card.is_matched {
            return FlipOutcome::Ignored;
        }

        card.is_flipped = true;
        self.flipped.push(card_id);
        // The clock runs from the first flip of the game.
        self.started = true;

        if self.flipped.len() < 2 {
            return FlipOutcome::Flipped;
        }

        self.moves += 1;
        let (first, second) = (self.flipped[0], self.flipped[1]);
        let resolution = if self.value_of(first) == self.value_of(second) {
            Resolution::Matched
        } else {
            Resolution::Mismatched
        };
        self.pending = Some(PendingResolution {
            resolution,
            first,
            second,
        });
        FlipOutcome::RoundClosed(resolution)
    }

    /// Apply the pending resolution after its reveal delay has elapsed.
    ///
    /// A match marks both cards matched and may complete the game; a
    /// mismatch turns both face down again. Either way the flipped set
    /// clears and clicks are accepted again. Returns `None` when nothing
    /// was pending.
    pub fn resolve_pending(&mut self) -> Option<Resolution> {
        let pending = self.pending.take()?;
        match pending.resolution {
            Resolution::Matched => {
                self.set_matched(pending.first);
                self.set_matched(pending.second);
                self.matched_pairs += 1;
                if self.matched_pairs == self.difficulty.total_pairs() {
                    // Terminal: no further flips or ticks are accepted.
                    self.completed = true;
                }
            }
            Resolution::Mismatched => {
                self.set_face_down(pending.first);
                self.set_face_down(pending.second);
            }
        }
        self.flipped.clear();
        Some(pending.resolution)
    }

    /// Advance the clock by one second while the game is live.
    pub fn tick_second(&mut self) {
        if self.started && !self.completed {
            self.time_seconds += 1;
        }
    }

    /// Abandon the current board and deal a fresh one.
    ///
    /// Any pending resolution is discarded here, which is what cancels
    /// the deferred reveal on restart.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.difficulty, seed);
    }

    /// Snapshot of the play-through for submission to the ledger.
    pub fn result(&self) -> GameResult {
        GameResult {
            difficulty: self.difficulty,
            score: calculate_score(
                self.time_seconds,
                self.moves,
                self.difficulty,
                self.completed,
            ),
            time_seconds: self.time_seconds,
            moves: self.moves,
            completed: self.completed,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn time_seconds(&self) -> u32 {
        self.time_seconds
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Resolution waiting on its reveal delay, if any.
    pub fn pending_resolution(&self) -> Option<Resolution> {
        self.pending.map(|p| p.resolution)
    }

    fn value_of(&self, card_id: u32) -> &'static str {
        self.cards
            .iter()
            .find(|c| c.id == card_id)
            .map(|c| c.value)
            .unwrap_or_default()
    }

    fn set_matched(&mut self, card_id: u32) {
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == card_id) {
            card.is_matched = true;
        }
    }

    fn set_face_down(&mut self, card_id: u32) {
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == card_id) {
            card.is_flipped = false;
        }
    }
}
