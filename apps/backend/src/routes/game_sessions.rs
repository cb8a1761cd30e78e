//! Game-session HTTP routes.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::rules::Difficulty;
use crate::entities::{game_sessions, users};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::routes::users::UserResponse;
use crate::services::game_sessions as sessions_service;
use crate::services::game_sessions::SessionUpdate;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameSessionRequest {
    pub user_id: i64,
    pub difficulty: Difficulty,
}

/// PUT body for recording final results.
///
/// `score` is accepted for wire compatibility with the browser client but
/// never persisted: the stored score is recomputed server-side from the
/// other three fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameSessionRequest {
    pub score: i32,
    pub time_seconds: i32,
    pub moves: i32,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct TopScoresQuery {
    pub difficulty: Option<Difficulty>,
    pub limit: Option<u64>,
}

/// Wire shape of a session with its user embedded; camelCase like the rest
/// of the client API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionResponse {
    pub id: i64,
    pub user: UserResponse,
    pub difficulty: Difficulty,
    pub score: i32,
    pub time_seconds: i32,
    pub moves: i32,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl GameSessionResponse {
    fn new(session: game_sessions::Model, user: users::Model) -> Self {
        Self {
            id: session.id,
            user: UserResponse::from(user),
            difficulty: session.difficulty,
            score: session.score,
            time_seconds: session.time_seconds,
            moves: session.moves,
            completed: session.completed,
            created_at: session.created_at,
        }
    }
}

/// POST /game-sessions
async fn create_session(
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateGameSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();

    let (session, user) = with_txn(&app_state, |txn| {
        Box::pin(async move {
            Ok(sessions_service::create_session(txn, req.user_id, req.difficulty).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameSessionResponse::new(session, user)))
}

/// GET /game-sessions/{id}
async fn get_session(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let (session, user) = sessions_service::get_session(app_state.db(), session_id).await?;

    Ok(HttpResponse::Ok().json(GameSessionResponse::new(session, user)))
}

/// PUT /game-sessions/{id}
///
/// Records final results; the session row and the user aggregates are
/// updated in one transaction.
async fn update_session(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateGameSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let req = body.into_inner();

    let (session, user) = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let update = SessionUpdate {
                time_seconds: req.time_seconds,
                moves: req.moves,
                completed: req.completed,
            };
            Ok(sessions_service::complete_session(txn, session_id, update).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameSessionResponse::new(session, user)))
}

/// GET /game-sessions/user/{userId}
async fn sessions_for_user(
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let (sessions, user) =
        sessions_service::sessions_for_user(app_state.db(), user_id).await?;

    let body: Vec<GameSessionResponse> = sessions
        .into_iter()
        .map(|session| GameSessionResponse::new(session, user.clone()))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /game-sessions/leaderboard/top-scores?difficulty=&limit=
async fn top_scores(
    app_state: web::Data<AppState>,
    query: web::Query<TopScoresQuery>,
) -> Result<HttpResponse, AppError> {
    let rows =
        sessions_service::top_scores(app_state.db(), query.difficulty, query.limit).await?;

    let body: Vec<GameSessionResponse> = rows
        .into_iter()
        .map(|(session, user)| GameSessionResponse::new(session, user))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_session)));
    cfg.service(web::resource("/leaderboard/top-scores").route(web::get().to(top_scores)));
    cfg.service(web::resource("/user/{user_id}").route(web::get().to(sessions_for_user)));
    cfg.service(
        web::resource("/{id}")
            .route(web::get().to(get_session))
            .route(web::put().to(update_session)),
    );
}
