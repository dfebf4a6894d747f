/**
 * Komik CRUD Handlers
 *
 * Listing and fetching are open to both roles; create, update and delete
 * are admin-only. Role requirements are enforced with the extractors from
 * `crate::middleware::auth` after the authentication gate has run.
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::komik::db::{self, Komik};
use crate::middleware::auth::{Authenticated, RequireAdmin};

/// Request body for creating or updating a komik
#[derive(Debug, Serialize, Deserialize)]
pub struct KomikPayload {
    pub judul: String,
    pub pengarang: String,
    /// Initial stock counter; must be non-negative
    #[serde(default)]
    pub stok: i64,
}

impl KomikPayload {
    fn validate(&self) -> Result<(), ApiError> {
        if self.judul.trim().is_empty() {
            return Err(ApiError::Validation("judul must not be empty"));
        }
        if self.stok < 0 {
            return Err(ApiError::Validation("stok must not be negative"));
        }
        Ok(())
    }
}

/// `GET /komik` - list all komik (admin and user).
pub async fn list_komik(
    _viewer: Authenticated,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<Komik>>, ApiError> {
    let komik = db::list_komik(&pool).await?;
    Ok(Json(komik))
}

/// `GET /komik/{id}` - fetch one komik (admin and user).
pub async fn get_komik(
    _viewer: Authenticated,
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<Komik>, ApiError> {
    let komik = db::get_komik_by_id(&pool, id)
        .await?
        .ok_or(ApiError::NotFound("komik"))?;
    Ok(Json(komik))
}

/// `POST /komik` - create a komik (admin only).
pub async fn create_komik(
    RequireAdmin(admin): RequireAdmin,
    State(pool): State<PgPool>,
    Json(payload): Json<KomikPayload>,
) -> Result<(StatusCode, Json<Komik>), ApiError> {
    payload.validate()?;

    let komik = db::create_komik(&pool, &payload.judul, &payload.pengarang, payload.stok).await?;

    tracing::info!(
        "Komik {} created by admin {}: {}",
        komik.id,
        admin.user_id,
        komik.judul
    );

    Ok((StatusCode::CREATED, Json(komik)))
}

/// `PUT /komik/{id}` - update a komik (admin only).
pub async fn update_komik(
    RequireAdmin(_admin): RequireAdmin,
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<KomikPayload>,
) -> Result<Json<Komik>, ApiError> {
    payload.validate()?;

    let komik = db::update_komik(&pool, id, &payload.judul, &payload.pengarang, payload.stok)
        .await?
        .ok_or(ApiError::NotFound("komik"))?;

    Ok(Json(komik))
}

/// `DELETE /komik/{id}` - delete a komik (admin only).
pub async fn delete_komik(
    RequireAdmin(admin): RequireAdmin,
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = db::delete_komik(&pool, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("komik"));
    }

    tracing::info!("Komik {} deleted by admin {}", id, admin.user_id);

    Ok(Json(json!({ "message": "komik deleted" })))
}
