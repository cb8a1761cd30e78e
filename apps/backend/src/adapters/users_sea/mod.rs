//! SeaORM adapter for the users table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; the services layer maps to DomainError
// via `infra::db_errors::map_db_err`.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        total_games_played: Set(0),
        total_score: Set(0),
        best_score: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

/// All users, best score first.
pub async fn list_by_best_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .order_by_desc(users::Column::BestScore)
        .all(conn)
        .await
}

pub async fn leaderboard<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .order_by_desc(users::Column::BestScore)
        .limit(limit)
        .all(conn)
        .await
}

/// Fold one completed session into the user's aggregate stats.
pub async fn apply_completed_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: users::Model,
    score: i32,
) -> Result<users::Model, sea_orm::DbErr> {
    let best_score = user.best_score.max(score);
    let mut user_active: users::ActiveModel = user.clone().into();
    user_active.total_games_played = Set(user.total_games_played + 1);
    user_active.total_score = Set(user.total_score + score);
    user_active.best_score = Set(best_score);
    user_active.updated_at = Set(time::OffsetDateTime::now_utc());
    user_active.update(conn).await
}
