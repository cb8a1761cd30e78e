use crate::config::db::{DbOwner, DbProfile};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self { db_profile: None }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db_profile {
            // single entrypoint: build + migrate
            Some(profile) => {
                let conn = bootstrap_db(profile, DbOwner::App).await?;
                Ok(AppState::new(conn))
            }
            None => Err(AppError::config(
                "application state requires a database profile".to_string(),
            )),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_fails_without_db_profile() {
        let err = build_state().build().await.unwrap_err();
        assert!(err.to_string().contains("database profile"));
    }
}
