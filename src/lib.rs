//! Content platform backend: user-facing API, generic admin tables and the admin panel client.

pub mod admin_ui;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod message;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use message::Message;
pub use response::ResultMessage;
pub use routes::app;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};

use sqlx::postgres::PgPoolOptions;

/// Connect to PostgreSQL (creating the database and tables when missing) when `DATABASE_URL`
/// is configured; otherwise state is backed by in-memory stores.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let pool = match &config.database_url {
        Some(url) => {
            ensure_database_exists(url).await?;
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(url)
                .await?;
            ensure_tables(&pool).await?;
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, rows are kept in memory");
            None
        }
    };
    Ok(AppState::new(config, pool))
}
