/**
 * Server Initialization
 *
 * Builds the application in order: connect the database pool, run
 * migrations, construct the stock broadcaster (which spawns its worker),
 * assemble the shared state, and wire the router.
 */

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use thiserror::Error;

use crate::routes::router::create_router;
use crate::server::config::Config;
use crate::server::state::AppState;
use crate::stock::broadcaster::StockBroadcaster;

/// Startup failures. Unlike request-time errors these are fatal.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Create and configure the Axum application.
pub async fn create_app(config: Config) -> Result<Router, InitError> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed");

    // The broadcaster is constructed once here and handed by reference to
    // every connection handler through the state.
    let broadcaster = StockBroadcaster::new(Arc::new(pool.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config),
        broadcaster,
    };

    Ok(create_router(state))
}
