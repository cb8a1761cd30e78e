//! User-related HTTP routes.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::entities::users;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::users as users_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u64>,
}

/// Wire shape of a user; camelCase to match what the browser client expects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub total_games_played: i32,
    pub total_score: i32,
    pub best_score: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            total_games_played: user.total_games_played,
            total_score: user.total_score,
            best_score: user.best_score,
            created_at: user.created_at,
        }
    }
}

/// POST /users
async fn create_user(
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();

    let user = with_txn(&app_state, |txn| {
        Box::pin(async move { Ok(users_service::create_user(txn, &req.username).await?) })
    })
    .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// GET /users
async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = users_service::list_users(app_state.db()).await?;

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /users/leaderboard?limit=
async fn leaderboard(
    app_state: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse, AppError> {
    let users = users_service::leaderboard(app_state.db(), query.limit).await?;

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /users/username/{username}
async fn get_user_by_username(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    let user = users_service::get_user_by_username(app_state.db(), &username).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// GET /users/{id}
async fn get_user(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let user = users_service::get_user(app_state.db(), user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_user))
            .route(web::get().to(list_users)),
    );
    cfg.service(web::resource("/leaderboard").route(web::get().to(leaderboard)));
    cfg.service(
        web::resource("/username/{username}").route(web::get().to(get_user_by_username)),
    );
    cfg.service(web::resource("/{id}").route(web::get().to(get_user)));
}
