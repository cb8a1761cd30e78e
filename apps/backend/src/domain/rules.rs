//! Fixed game rules: the difficulty table and the card symbol catalog.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Difficulty level, fixing grid size and pair count.
///
/// Serializes as the lowercase strings `"easy" | "medium" | "hard"`, both
/// on the wire and in the `game_sessions.difficulty` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[sea_orm(string_value = "easy")]
    Easy,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "hard")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Board edge length: the board is `grid_size × grid_size` cards.
    #[inline]
    pub fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard => 8,
        }
    }

    /// Number of card pairs on the board. Invariant: `grid_size² / 2`.
    #[inline]
    pub fn total_pairs(self) -> usize {
        self.grid_size() * self.grid_size() / 2
    }

    /// Base score awarded for completing a game at this difficulty.
    #[inline]
    pub fn base_score(self) -> i32 {
        match self {
            Difficulty::Easy => 100,
            Difficulty::Medium => 200,
            Difficulty::Hard => 300,
        }
    }

    /// A perfect game matches every pair on the first try: one move per pair.
    #[inline]
    pub fn perfect_moves(self) -> u32 {
        self.total_pairs() as u32
    }
}

/// Symbols cards are paired on. Hard (32 pairs) uses the whole catalog.
pub const CARD_SYMBOLS: [&str; 32] = [
    "🎮", "🎯", "🎪", "🎨", "🎭", "🎵", "🎸", "🎹", //
    "🎲", "🎳", "🃏", "🎰", "🎊", "🎈", "🎁", "🎂", //
    "🎄", "🎃", "🎀", "🎗️", "🏆", "🏅", "🥇", "🥈", //
    "⭐", "🌟", "💎", "💫", "🔥", "⚡", "🌈", "🦄",
];
