//! User service: registration, lookups, leaderboard, aggregate stats.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::users_sea;
use crate::entities::users::Model as User;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;

/// Default number of rows returned by the user leaderboard.
pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;

/// Trim and validate a submitted username.
fn validate_username(raw: &str) -> Result<&str, DomainError> {
    let username = raw.trim();
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN || len > USERNAME_MAX_LEN {
        return Err(DomainError::validation(format!(
            "Username must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters, got {len}"
        )));
    }
    Ok(username)
}

/// Register a new user.
///
/// Duplicate usernames are rejected up front; the unique index on
/// `users.username` still backstops a racing insert, surfacing as the
/// same conflict via `map_db_err`.
pub async fn create_user(
    conn: &(impl ConnectionTrait + Send + Sync),
    raw_username: &str,
) -> Result<User, DomainError> {
    let username = validate_username(raw_username)?;

    let existing = users_sea::find_by_username(conn, username)
        .await
        .map_err(map_db_err)?;
    if existing.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::UniqueUsername,
            "Username already exists",
        ));
    }

    let user = users_sea::create_user(conn, users_sea::UserCreate::new(username))
        .await
        .map_err(map_db_err)?;

    info!(user_id = user.id, username = %user.username, "user created");
    Ok(user)
}

pub async fn get_user(conn: &(impl ConnectionTrait + Send + Sync), user_id: i64) -> Result<User, DomainError> {
    users_sea::find_by_id(conn, user_id)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
        })
}

pub async fn get_user_by_username(
    conn: &(impl ConnectionTrait + Send + Sync),
    username: &str,
) -> Result<User, DomainError> {
    users_sea::find_by_username(conn, username)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))
}

/// All users, best score first.
pub async fn list_users(conn: &(impl ConnectionTrait + Send + Sync)) -> Result<Vec<User>, DomainError> {
    users_sea::list_by_best_score(conn).await.map_err(map_db_err)
}

/// Top players by best score.
pub async fn leaderboard(
    conn: &(impl ConnectionTrait + Send + Sync),
    limit: Option<u64>,
) -> Result<Vec<User>, DomainError> {
    let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    users_sea::leaderboard(conn, limit).await.map_err(map_db_err)
}

/// Fold one completed session into the user's aggregates:
/// `total_games_played += 1`, `total_score += score`,
/// `best_score = max(best_score, score)`.
///
/// Called exactly once per session, on its completing update.
pub async fn apply_completed_session(
    conn: &(impl ConnectionTrait + Send + Sync),
    user_id: i64,
    score: i32,
) -> Result<User, DomainError> {
    let user = get_user(conn, user_id).await?;
    let updated = users_sea::apply_completed_session(conn, user, score)
        .await
        .map_err(map_db_err)?;

    info!(
        user_id = updated.id,
        score,
        best_score = updated.best_score,
        total_games_played = updated.total_games_played,
        "user stats updated"
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::validate_username;

    #[test]
    fn usernames_are_trimmed() {
        assert_eq!(validate_username("  ada  ").unwrap(), "ada");
    }

    #[test]
    fn too_short_and_too_long_usernames_are_rejected() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"x".repeat(21)).is_err());
        assert!(validate_username(&"x".repeat(20)).is_ok());
    }

    #[test]
    fn length_is_counted_in_characters_not_bytes() {
        // 3 emoji, 12 bytes
        assert!(validate_username("🦄🦄🦄").is_ok());
    }
}
