/**
 * Application State
 *
 * `AppState` is the central state container, built once at startup and
 * cloned into every handler. The `FromRef` implementations let handlers
 * extract just the piece they need (for example `State<PgPool>` in the
 * database handlers) instead of the whole state.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::server::config::Config;
use crate::stock::broadcaster::StockBroadcaster;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Runtime configuration (token secret, timeouts)
    pub config: Arc<Config>,
    /// The stock update hub, shared with every live connection
    pub broadcaster: Arc<StockBroadcaster>,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.config)
    }
}

impl FromRef<AppState> for Arc<StockBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.broadcaster)
    }
}
