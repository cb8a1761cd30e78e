//! SeaORM adapter for the game_sessions table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::rules::Difficulty;
use crate::entities::{game_sessions, users};

pub mod dto;

pub use dto::{SessionCreate, SessionFinish};

// Adapter functions return DbErr; the services layer maps to DomainError
// via `infra::db_errors::map_db_err`.

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionCreate,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let session_active = game_sessions::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        difficulty: Set(dto.difficulty),
        score: Set(0),
        time_seconds: Set(0),
        moves: Set(0),
        completed: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    session_active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Option<game_sessions::Model>, sea_orm::DbErr> {
    game_sessions::Entity::find_by_id(session_id).one(conn).await
}

/// Session joined with its owning user.
pub async fn find_by_id_with_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Option<(game_sessions::Model, Option<users::Model>)>, sea_orm::DbErr> {
    game_sessions::Entity::find_by_id(session_id)
        .find_also_related(users::Entity)
        .one(conn)
        .await
}

/// Record the final results on a session row.
pub async fn apply_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session: game_sessions::Model,
    dto: SessionFinish,
) -> Result<game_sessions::Model, sea_orm::DbErr> {
    let mut session_active: game_sessions::ActiveModel = session.into();
    session_active.score = Set(dto.score);
    session_active.time_seconds = Set(dto.time_seconds);
    session_active.moves = Set(dto.moves);
    session_active.completed = Set(dto.completed);
    session_active.updated_at = Set(time::OffsetDateTime::now_utc());
    session_active.update(conn).await
}

/// A user's sessions, most recent first.
///
/// The id tiebreak keeps ordering stable when several sessions share the
/// same second-resolution timestamp.
pub async fn find_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<game_sessions::Model>, sea_orm::DbErr> {
    game_sessions::Entity::find()
        .filter(game_sessions::Column::UserId.eq(user_id))
        .order_by_desc(game_sessions::Column::CreatedAt)
        .order_by_desc(game_sessions::Column::Id)
        .all(conn)
        .await
}

/// Top completed sessions by score, optionally filtered by difficulty,
/// each joined with its user.
pub async fn top_scores<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    difficulty: Option<Difficulty>,
    limit: u64,
) -> Result<Vec<(game_sessions::Model, Option<users::Model>)>, sea_orm::DbErr> {
    let mut query = game_sessions::Entity::find()
        .find_also_related(users::Entity)
        .filter(game_sessions::Column::Completed.eq(true));

    if let Some(difficulty) = difficulty {
        query = query.filter(game_sessions::Column::Difficulty.eq(difficulty));
    }

    query
        .order_by_desc(game_sessions::Column::Score)
        .order_by_asc(game_sessions::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}
