/**
 * Komik Routes
 *
 * All komik routes sit behind the authentication gate; per-handler role
 * requirements (admin-only writes) are enforced by the extractors inside
 * the handlers. `/komik/updates` upgrades into the live stock feed, so the
 * gate runs on the upgrade request itself.
 */

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::komik::handlers::{create_komik, delete_komik, get_komik, list_komik, update_komik};
use crate::middleware::auth::authenticate;
use crate::server::state::AppState;
use crate::stock::ws::stock_updates;

pub fn komik_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/komik", get(list_komik).post(create_komik))
        .route(
            "/komik/{id}",
            get(get_komik).put(update_komik).delete(delete_komik),
        )
        .route("/komik/updates", get(stock_updates))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
