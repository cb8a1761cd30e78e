pub mod game_sessions;
pub mod users;
