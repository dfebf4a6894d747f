/**
 * Comment Routes
 *
 * Authenticated; visibility and ownership rules live in the handlers.
 */

use axum::middleware;
use axum::routing::{get, put};
use axum::Router;

use crate::comments::handlers::{create_comment, delete_comment, list_comments, update_comment};
use crate::middleware::auth::authenticate;
use crate::server::state::AppState;

pub fn comment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments).post(create_comment))
        .route("/comments/{id}", put(update_comment).delete(delete_comment))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
