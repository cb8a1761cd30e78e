pub mod game_sessions_sea;
pub mod users_sea;
