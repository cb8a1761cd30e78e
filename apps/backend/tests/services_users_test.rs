use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use backend::services::users;
use backend::test_support::state::sqlite_state;
use backend_test_support::unique_helpers::unique_username;

#[tokio::test]
async fn create_user_then_look_it_up() {
    let state = sqlite_state().await.expect("sqlite state");
    let db = state.db();

    let username = unique_username("ada");
    let user = users::create_user(db, &username)
        .await
        .expect("should create user");

    assert_eq!(user.username, username);
    assert!(user.id > 0);
    assert_eq!(user.total_games_played, 0);
    assert_eq!(user.total_score, 0);
    assert_eq!(user.best_score, 0);

    let by_id = users::get_user(db, user.id).await.expect("find by id");
    assert_eq!(by_id, user);

    let by_name = users::get_user_by_username(db, &username)
        .await
        .expect("find by username");
    assert_eq!(by_name.id, user.id);
}

#[tokio::test]
async fn usernames_are_trimmed_before_storage() {
    let state = sqlite_state().await.expect("sqlite state");
    let db = state.db();

    let user = users::create_user(db, "  grace  ").await.expect("create");
    assert_eq!(user.username, "grace");
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let state = sqlite_state().await.expect("sqlite state");
    let db = state.db();

    let username = unique_username("dup");
    users::create_user(db, &username).await.expect("first create");

    let err = users::create_user(db, &username)
        .await
        .expect_err("second create must fail");
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UniqueUsername, _)
    ));
}

#[tokio::test]
async fn invalid_usernames_are_rejected_before_the_database() {
    let state = sqlite_state().await.expect("sqlite state");
    let db = state.db();

    for bad in ["", "ab", "   ", &"x".repeat(21)] {
        let err = users::create_user(db, bad).await.expect_err("must reject");
        assert!(matches!(err, DomainError::Validation(_)), "{bad:?}");
    }
}

#[tokio::test]
async fn unknown_user_lookups_are_not_found() {
    let state = sqlite_state().await.expect("sqlite state");
    let db = state.db();

    let err = users::get_user(db, 424242).await.expect_err("missing id");
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));

    let err = users::get_user_by_username(db, "nobody-here")
        .await
        .expect_err("missing username");
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
}

#[tokio::test]
async fn aggregates_accumulate_over_completed_sessions() {
    let state = sqlite_state().await.expect("sqlite state");
    let db = state.db();

    let user = users::create_user(db, &unique_username("agg"))
        .await
        .expect("create");

    // Three completed sessions with scores 120, 80, 200.
    for score in [120, 80, 200] {
        users::apply_completed_session(db, user.id, score)
            .await
            .expect("apply stats");
    }

    let user = users::get_user(db, user.id).await.expect("reload");
    assert_eq!(user.total_games_played, 3);
    assert_eq!(user.total_score, 400);
    assert_eq!(user.best_score, 200);
}

#[tokio::test]
async fn leaderboard_orders_by_best_score_and_honors_limit() {
    let state = sqlite_state().await.expect("sqlite state");
    let db = state.db();

    let scores = [50, 300, 150];
    let mut ids = Vec::new();
    for score in scores {
        let user = users::create_user(db, &unique_username("lb"))
            .await
            .expect("create");
        users::apply_completed_session(db, user.id, score)
            .await
            .expect("apply stats");
        ids.push(user.id);
    }

    let top = users::leaderboard(db, Some(2)).await.expect("leaderboard");
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].best_score, 300);
    assert_eq!(top[1].best_score, 150);

    let all = users::list_users(db).await.expect("list");
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].best_score >= w[1].best_score));
}
