use actix_web::web;

pub mod game_sessions;
pub mod health;
pub mod users;

/// Configure application routes for both the HttpServer and test apps.
///
/// Route order matters inside each scope: literal segments
/// (`/leaderboard`, `/username/...`) must be registered before the
/// parameterized `/{id}` routes so they are not captured as ids.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // User routes: /users/**
    cfg.service(web::scope("/users").configure(users::configure_routes));

    // Game session routes: /game-sessions/**
    cfg.service(web::scope("/game-sessions").configure(game_sessions::configure_routes));
}
