/**
 * Router Configuration
 *
 * Combines all route groups into a single Axum router:
 *
 * - `POST /login`, `POST /register` - public
 * - `/komik` group - authenticated; see `komik_routes`
 * - `/comments` group - authenticated; see `comment_routes`
 *
 * The CORS layer is deliberately permissive plumbing, matching the
 * original service; policy tuning is out of scope here.
 */

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::handlers::{login, register};
use crate::routes::comment_routes::comment_routes;
use crate::routes::komik_routes::komik_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .merge(komik_routes(state.clone()))
        .merge(comment_routes(state.clone()))
        .layer(cors_layer())
        .fallback(|| async { (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))) })
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
