//! Score calculation.
//!
//! This is the single authoritative formula: the engine's live preview and
//! the server's recompute on session completion both call
//! [`calculate_score`]. A client-submitted score is never persisted.

use crate::domain::rules::Difficulty;

/// Compute the final score for a play-through.
///
/// An incomplete game scores 0 regardless of time and moves. Otherwise:
///
/// * `time_bonus = max(0, base - 2 × time_seconds)` — faster is better,
///   the bonus is capped at `base` and bottoms out at 0.
/// * `moves_penalty = max(0, 5 × (moves - perfect_moves))` — each move
///   beyond one-per-pair costs 5 points.
/// * `score = max(0, base + time_bonus - moves_penalty)`.
///
/// The bonus and the final total are clamped in two separate stages; the
/// order matters when intermediate values go negative, so the stages must
/// not be merged. There is no upper bound: a 0-second completion scores
/// `2 × base`.
pub fn calculate_score(
    time_seconds: u32,
    moves: u32,
    difficulty: Difficulty,
    completed: bool,
) -> i32 {
    if !completed {
        return 0;
    }

    let base = difficulty.base_score();
    let time_bonus = (base - 2 * time_seconds as i32).max(0);
    let moves_penalty = (5 * (moves as i32 - difficulty.perfect_moves() as i32)).max(0);

    (base + time_bonus - moves_penalty).max(0)
}
