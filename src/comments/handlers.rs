/**
 * Comment Handlers
 *
 * Visibility and ownership rules:
 *
 * - `GET /comments`: admins see every comment, users only their own
 * - `POST /comments`: users only; the author id always comes from the
 *   verified token, never from the request body
 * - `PUT /comments/{id}`: users only, and only on their own comments
 * - `DELETE /comments/{id}`: admins delete anything, users their own
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;

use crate::auth::Role;
use crate::comments::db::{self, Comment};
use crate::error::ApiError;
use crate::middleware::auth::{Authenticated, CurrentUser, RequireUser};

/// Request body for creating a comment
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub komik_id: i64,
    pub komentar: String,
}

/// Request body for editing a comment
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub komentar: String,
}

/// Which author's comments the caller may list: `None` means all of them.
fn comment_scope(user: &CurrentUser) -> Option<i64> {
    match user.role {
        Role::Admin => None,
        Role::User => Some(user.user_id),
    }
}

/// Whether the caller may delete a comment owned by `owner_id`.
fn may_delete(user: &CurrentUser, owner_id: i64) -> bool {
    user.role == Role::Admin || user.user_id == owner_id
}

/// `GET /comments` - list comments visible to the caller.
pub async fn list_comments(
    Authenticated(user): Authenticated,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = match comment_scope(&user) {
        None => db::list_comments(&pool).await?,
        Some(user_id) => db::list_comments_for_user(&pool, user_id).await?,
    };
    Ok(Json(comments))
}

/// `POST /comments` - create a comment (regular users only).
pub async fn create_comment(
    RequireUser(user): RequireUser,
    State(pool): State<PgPool>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    if request.komentar.trim().is_empty() {
        return Err(ApiError::Validation("komentar must not be empty"));
    }

    let comment =
        db::create_comment(&pool, user.user_id, request.komik_id, &request.komentar).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// `PUT /comments/{id}` - edit a comment (author only).
pub async fn update_comment(
    RequireUser(user): RequireUser,
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let comment = db::get_comment_by_id(&pool, id)
        .await?
        .ok_or(ApiError::NotFound("comment"))?;

    if comment.user_id != user.user_id {
        return Err(ApiError::Forbidden("only the author may edit this comment"));
    }

    let updated = db::update_comment(&pool, id, &request.komentar)
        .await?
        .ok_or(ApiError::NotFound("comment"))?;

    Ok(Json(updated))
}

/// `DELETE /comments/{id}` - delete a comment (admin, or the author).
pub async fn delete_comment(
    Authenticated(user): Authenticated,
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let comment = db::get_comment_by_id(&pool, id)
        .await?
        .ok_or(ApiError::NotFound("comment"))?;

    if !may_delete(&user, comment.user_id) {
        return Err(ApiError::Forbidden(
            "only the author or an admin may delete this comment",
        ));
    }

    db::delete_comment(&pool, id).await?;

    Ok(Json(json!({ "message": "comment deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(id: i64) -> CurrentUser {
        CurrentUser {
            user_id: id,
            role: Role::Admin,
        }
    }

    fn user(id: i64) -> CurrentUser {
        CurrentUser {
            user_id: id,
            role: Role::User,
        }
    }

    #[test]
    fn test_admin_sees_all_comments() {
        assert_eq!(comment_scope(&admin(1)), None);
    }

    #[test]
    fn test_user_sees_only_own_comments() {
        assert_eq!(comment_scope(&user(42)), Some(42));
    }

    #[test]
    fn test_admin_may_delete_any_comment() {
        assert!(may_delete(&admin(1), 99));
        assert!(may_delete(&admin(1), 1));
    }

    #[test]
    fn test_user_may_delete_only_own_comment() {
        assert!(may_delete(&user(42), 42));
        assert!(!may_delete(&user(42), 7));
    }
}
