//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{GroupRepository, PostRepository, UserRepository};
use scribe_infra::database::memory::{
    InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository,
};
use scribe_infra::database::postgres::{
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};
use scribe_infra::database::{DatabaseConfig, connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let state = match db_config {
            Some(config) => match connect(config).await {
                Ok(db) => {
                    let db = Arc::new(db);
                    Some(Self {
                        users: Arc::new(PostgresUserRepository::new(Arc::clone(&db))),
                        groups: Arc::new(PostgresGroupRepository::new(Arc::clone(&db))),
                        posts: Arc::new(PostgresPostRepository::new(db)),
                    })
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    None
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                None
            }
        };

        let state = state.unwrap_or_else(Self::in_memory);
        tracing::info!("Application state initialized");
        state
    }

    /// In-memory repositories - no-database fallback, also used by tests.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            groups: Arc::new(InMemoryGroupRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
        }
    }
}
