/**
 * Comment Model and Database Operations
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Comment struct representing a row in the `comments` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment id
    pub id: i64,
    /// Author's user id
    pub user_id: i64,
    /// Komik this comment belongs to
    pub komik_id: i64,
    /// Comment text
    pub komentar: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// List all comments (admin view).
pub async fn list_comments(pool: &PgPool) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, user_id, komik_id, komentar, created_at
        FROM comments
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// List comments authored by one user.
pub async fn list_comments_for_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, user_id, komik_id, komentar, created_at
        FROM comments
        WHERE user_id = $1
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Get a comment by id.
pub async fn get_comment_by_id(pool: &PgPool, id: i64) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, user_id, komik_id, komentar, created_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Create a comment.
pub async fn create_comment(
    pool: &PgPool,
    user_id: i64,
    komik_id: i64,
    komentar: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (user_id, komik_id, komentar)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, komik_id, komentar, created_at
        "#,
    )
    .bind(user_id)
    .bind(komik_id)
    .bind(komentar)
    .fetch_one(pool)
    .await
}

/// Update a comment's text.
///
/// # Returns
/// Updated comment, or None if the id does not exist
pub async fn update_comment(
    pool: &PgPool,
    id: i64,
    komentar: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET komentar = $2
        WHERE id = $1
        RETURNING id, user_id, komik_id, komentar, created_at
        "#,
    )
    .bind(id)
    .bind(komentar)
    .fetch_optional(pool)
    .await
}

/// Delete a comment.
pub async fn delete_comment(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
