//! DTOs for game_sessions_sea adapter.

use crate::domain::rules::Difficulty;

/// DTO for creating a pending game session.
#[derive(Debug, Clone)]
pub struct SessionCreate {
    pub user_id: i64,
    pub difficulty: Difficulty,
}

impl SessionCreate {
    pub fn new(user_id: i64, difficulty: Difficulty) -> Self {
        Self {
            user_id,
            difficulty,
        }
    }
}

/// DTO for recording a session's final results.
///
/// `score` is always the server-recomputed value, never client input.
#[derive(Debug, Clone, Copy)]
pub struct SessionFinish {
    pub score: i32,
    pub time_seconds: i32,
    pub moves: i32,
    pub completed: bool,
}
