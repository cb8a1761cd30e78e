use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Unified database connector that supports different profiles and owners.
/// This function does NOT run any migrations.
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    // Build database URL from environment variables
    let database_url = db_url(profile, owner)?;

    // Connect to database
    let conn = Database::connect(&database_url).await?;
    Ok(conn)
}

/// Single bootstrap entrypoint: connect + migrate.
/// Used to build application state in `main` and in integration tests
/// running against a real Postgres instance.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile, owner).await?;
    migration::migrate(&conn, MigrationCommand::Up).await?;
    info!(?profile, "database bootstrapped");
    Ok(conn)
}

/// Connect to an in-memory SQLite database and migrate it.
///
/// The pool is pinned to a single connection: every pooled SQLite
/// `:memory:` connection opens its own empty database, so a larger pool
/// would scatter the schema across invisible databases.
pub async fn bootstrap_sqlite_memory() -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).min_connections(1);

    let conn = Database::connect(opts).await?;
    migration::migrate(&conn, MigrationCommand::Up).await?;
    Ok(conn)
}
