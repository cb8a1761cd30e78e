//! Game session service: session lifecycle and leaderboards.
//!
//! The score stored on a session is always recomputed here from the
//! submitted time/moves/difficulty/completed; a client-supplied score is
//! never trusted for persistence.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::game_sessions_sea;
use crate::domain::rules::Difficulty;
use crate::domain::scoring::calculate_score;
use crate::entities::game_sessions::Model as GameSession;
use crate::entities::users::Model as User;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::infra::db_errors::map_db_err;
use crate::services::users;

/// Default number of rows returned by the top-scores leaderboard.
pub const DEFAULT_TOP_SCORES_LIMIT: u64 = 10;

/// Final results submitted for a session. The client's score preview is
/// deliberately absent: only the inputs to the formula are accepted.
#[derive(Debug, Clone, Copy)]
pub struct SessionUpdate {
    pub time_seconds: i32,
    pub moves: i32,
    pub completed: bool,
}

/// Start a pending session for a user (score 0, completed false).
pub async fn create_session(
    conn: &(impl ConnectionTrait + Send + Sync),
    user_id: i64,
    difficulty: Difficulty,
) -> Result<(GameSession, User), DomainError> {
    let user = users::get_user(conn, user_id).await?;

    let session = game_sessions_sea::create_session(
        conn,
        game_sessions_sea::SessionCreate::new(user.id, difficulty),
    )
    .await
    .map_err(map_db_err)?;

    info!(
        session_id = session.id,
        user_id = user.id,
        difficulty = ?session.difficulty,
        "game session created"
    );
    Ok((session, user))
}

/// Load a session together with its owning user.
pub async fn get_session(
    conn: &(impl ConnectionTrait + Send + Sync),
    session_id: i64,
) -> Result<(GameSession, User), DomainError> {
    let (session, user) = game_sessions_sea::find_by_id_with_user(conn, session_id)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, "Game session not found")
        })?;

    // The FK guarantees the user row; a miss here means the data is broken.
    let user = user.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::Other("DataCorruption".into()),
            format!("Session {session_id} has no user row"),
        )
    })?;

    Ok((session, user))
}

/// Record a session's final results.
///
/// Recomputes the score from the submitted inputs, stores them, and -- only
/// when the update marks the session completed -- folds the score into the
/// user's aggregates within the caller's transaction. A session that already
/// carries a completing update is immutable; a second attempt conflicts.
pub async fn complete_session(
    conn: &(impl ConnectionTrait + Send + Sync),
    session_id: i64,
    update: SessionUpdate,
) -> Result<(GameSession, User), DomainError> {
    if update.time_seconds < 0 {
        return Err(DomainError::validation("timeSeconds must be >= 0"));
    }
    if update.moves < 0 {
        return Err(DomainError::validation("moves must be >= 0"));
    }

    let (session, user) = get_session(conn, session_id).await?;
    if session.completed {
        return Err(DomainError::conflict(
            ConflictKind::SessionCompleted,
            "Game session already carries a completing update",
        ));
    }

    let score = calculate_score(
        update.time_seconds as u32,
        update.moves as u32,
        session.difficulty,
        update.completed,
    );

    let session = game_sessions_sea::apply_result(
        conn,
        session,
        game_sessions_sea::SessionFinish {
            score,
            time_seconds: update.time_seconds,
            moves: update.moves,
            completed: update.completed,
        },
    )
    .await
    .map_err(map_db_err)?;

    let user = if update.completed {
        users::apply_completed_session(conn, user.id, score).await?
    } else {
        user
    };

    info!(
        session_id = session.id,
        user_id = user.id,
        score,
        completed = session.completed,
        "game session updated"
    );
    Ok((session, user))
}

/// A user's sessions, most recent first.
pub async fn sessions_for_user(
    conn: &(impl ConnectionTrait + Send + Sync),
    user_id: i64,
) -> Result<(Vec<GameSession>, User), DomainError> {
    let user = users::get_user(conn, user_id).await?;
    let sessions = game_sessions_sea::find_by_user(conn, user.id)
        .await
        .map_err(map_db_err)?;
    Ok((sessions, user))
}

/// Top completed sessions by score, optionally filtered by difficulty.
pub async fn top_scores(
    conn: &(impl ConnectionTrait + Send + Sync),
    difficulty: Option<Difficulty>,
    limit: Option<u64>,
) -> Result<Vec<(GameSession, User)>, DomainError> {
    let limit = limit.unwrap_or(DEFAULT_TOP_SCORES_LIMIT);
    let rows = game_sessions_sea::top_scores(conn, difficulty, limit)
        .await
        .map_err(map_db_err)?;

    // Drop sessions whose user row is missing; the FK makes this unreachable.
    Ok(rows
        .into_iter()
        .filter_map(|(session, user)| user.map(|u| (session, u)))
        .collect())
}
