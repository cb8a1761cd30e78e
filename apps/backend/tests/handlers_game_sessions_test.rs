use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend::routes;
use backend::test_support::state::sqlite_state;
use backend::RequestTrace;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_username;
use serde_json::{json, Value};

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! create_user {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "username": unique_username("p") }))
            .to_request();
        let user: Value = test::call_and_read_body_json(&$app, req).await;
        user
    }};
}

#[actix_web::test]
async fn session_lifecycle_recomputes_score_server_side() {
    let state = sqlite_state().await.expect("sqlite state");
    let app = test_app!(state);
    let user = create_user!(app);

    // Start a pending session.
    let req = test::TestRequest::post()
        .uri("/game-sessions")
        .set_json(json!({ "userId": user["id"], "difficulty": "easy" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let session: Value = test::read_body_json(resp).await;
    assert_eq!(session["difficulty"], "easy");
    assert_eq!(session["score"], 0);
    assert_eq!(session["completed"], false);
    assert_eq!(session["user"]["id"], user["id"]);

    // Submit results with a bogus client score; the server must recompute.
    let req = test::TestRequest::put()
        .uri(&format!("/game-sessions/{}", session["id"]))
        .set_json(json!({
            "score": 99999,
            "timeSeconds": 45,
            "moves": 20,
            "completed": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;

    // The worked example: base 100 + bonus 10 - penalty 60 = 50.
    assert_eq!(updated["score"], 50);
    assert_eq!(updated["timeSeconds"], 45);
    assert_eq!(updated["moves"], 20);
    assert_eq!(updated["completed"], true);

    // Aggregates applied in the same update, visible in the embedded user.
    assert_eq!(updated["user"]["totalGamesPlayed"], 1);
    assert_eq!(updated["user"]["totalScore"], 50);
    assert_eq!(updated["user"]["bestScore"], 50);

    // The session is readable and final.
    let req = test::TestRequest::get()
        .uri(&format!("/game-sessions/{}", session["id"]))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["score"], 50);
}

#[actix_web::test]
async fn second_completing_update_returns_409() {
    let state = sqlite_state().await.expect("sqlite state");
    let app = test_app!(state);
    let user = create_user!(app);

    let req = test::TestRequest::post()
        .uri("/game-sessions")
        .set_json(json!({ "userId": user["id"], "difficulty": "easy" }))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;

    let update = json!({
        "score": 0,
        "timeSeconds": 0,
        "moves": 8,
        "completed": true
    });
    let req = test::TestRequest::put()
        .uri(&format!("/game-sessions/{}", session["id"]))
        .set_json(update.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/game-sessions/{}", session["id"]))
        .set_json(update)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "SESSION_ALREADY_COMPLETED",
        StatusCode::CONFLICT,
        Some("completing update"),
    )
    .await;
}

#[actix_web::test]
async fn creating_a_session_for_an_unknown_user_returns_404() {
    let state = sqlite_state().await.expect("sqlite state");
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/game-sessions")
        .set_json(json!({ "userId": 999999, "difficulty": "hard" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "USER_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("not found"),
    )
    .await;
}

#[actix_web::test]
async fn unknown_session_returns_404() {
    let state = sqlite_state().await.expect("sqlite state");
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/game-sessions/777777")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "SESSION_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("not found"),
    )
    .await;
}

#[actix_web::test]
async fn negative_time_returns_400_validation_problem() {
    let state = sqlite_state().await.expect("sqlite state");
    let app = test_app!(state);
    let user = create_user!(app);

    let req = test::TestRequest::post()
        .uri("/game-sessions")
        .set_json(json!({ "userId": user["id"], "difficulty": "easy" }))
        .to_request();
    let session: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/game-sessions/{}", session["id"]))
        .set_json(json!({
            "score": 0,
            "timeSeconds": -1,
            "moves": 8,
            "completed": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("timeSeconds"),
    )
    .await;
}

#[actix_web::test]
async fn user_session_history_is_newest_first() {
    let state = sqlite_state().await.expect("sqlite state");
    let app = test_app!(state);
    let user = create_user!(app);

    let mut ids = Vec::new();
    for difficulty in ["easy", "medium", "hard"] {
        let req = test::TestRequest::post()
            .uri("/game-sessions")
            .set_json(json!({ "userId": user["id"], "difficulty": difficulty }))
            .to_request();
        let session: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(session["id"].as_i64().unwrap());
    }

    let req = test::TestRequest::get()
        .uri(&format!("/game-sessions/user/{}", user["id"]))
        .to_request();
    let sessions: Value = test::call_and_read_body_json(&app, req).await;
    let listed: Vec<i64> = sessions
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[actix_web::test]
async fn top_scores_leaderboard_filters_by_difficulty() {
    let state = sqlite_state().await.expect("sqlite state");
    let app = test_app!(state);
    let user = create_user!(app);

    // Two completed easy games (scores 200 and 140) and one completed hard
    // game (score 600); one pending medium game that must not appear.
    for (difficulty, moves, complete) in [
        ("easy", 8, true),
        ("easy", 20, true),
        ("hard", 32, true),
        ("medium", 0, false),
    ] {
        let req = test::TestRequest::post()
            .uri("/game-sessions")
            .set_json(json!({ "userId": user["id"], "difficulty": difficulty }))
            .to_request();
        let session: Value = test::call_and_read_body_json(&app, req).await;

        if complete {
            let req = test::TestRequest::put()
                .uri(&format!("/game-sessions/{}", session["id"]))
                .set_json(json!({
                    "score": 0,
                    "timeSeconds": 0,
                    "moves": moves,
                    "completed": true
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    let req = test::TestRequest::get()
        .uri("/game-sessions/leaderboard/top-scores")
        .to_request();
    let rows: Value = test::call_and_read_body_json(&app, req).await;
    let scores: Vec<i64> = rows
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["score"].as_i64().unwrap())
        .collect();
    assert_eq!(scores, vec![600, 200, 140]);

    let req = test::TestRequest::get()
        .uri("/game-sessions/leaderboard/top-scores?difficulty=easy&limit=1")
        .to_request();
    let rows: Value = test::call_and_read_body_json(&app, req).await;
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["score"], 200);
    assert_eq!(rows[0]["difficulty"], "easy");
    assert_eq!(rows[0]["user"]["id"], user["id"]);
}
