use crate::error::AppError;
use crate::infra::db::bootstrap_sqlite_memory;
use crate::state::app_state::AppState;

/// Build an AppState backed by a fresh in-memory SQLite database with the
/// schema migrated. Every call yields an isolated database, so tests need
/// no serialization or cleanup.
pub async fn sqlite_state() -> Result<AppState, AppError> {
    let conn = bootstrap_sqlite_memory().await?;
    Ok(AppState::new(conn))
}
