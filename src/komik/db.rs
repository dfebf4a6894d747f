/**
 * Komik Model and Database Operations
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Komik struct representing a row in the `komik` table.
///
/// The full serialized form of this struct is also the outbound WebSocket
/// message pushed to viewers after every stock mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Komik {
    /// Unique komik id
    pub id: i64,
    /// Title
    pub judul: String,
    /// Author
    pub pengarang: String,
    /// Stock counter; never negative
    pub stok: i64,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// List all komik, newest first.
pub async fn list_komik(pool: &PgPool) -> Result<Vec<Komik>, sqlx::Error> {
    sqlx::query_as::<_, Komik>(
        r#"
        SELECT id, judul, pengarang, stok, created_at, updated_at
        FROM komik
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Get a komik by id.
///
/// # Returns
/// Komik or None if not found
pub async fn get_komik_by_id(pool: &PgPool, id: i64) -> Result<Option<Komik>, sqlx::Error> {
    sqlx::query_as::<_, Komik>(
        r#"
        SELECT id, judul, pengarang, stok, created_at, updated_at
        FROM komik
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Create a new komik.
pub async fn create_komik(
    pool: &PgPool,
    judul: &str,
    pengarang: &str,
    stok: i64,
) -> Result<Komik, sqlx::Error> {
    sqlx::query_as::<_, Komik>(
        r#"
        INSERT INTO komik (judul, pengarang, stok)
        VALUES ($1, $2, $3)
        RETURNING id, judul, pengarang, stok, created_at, updated_at
        "#,
    )
    .bind(judul)
    .bind(pengarang)
    .bind(stok)
    .fetch_one(pool)
    .await
}

/// Update a komik's descriptive fields and stock.
///
/// # Returns
/// Updated komik, or None if the id does not exist
pub async fn update_komik(
    pool: &PgPool,
    id: i64,
    judul: &str,
    pengarang: &str,
    stok: i64,
) -> Result<Option<Komik>, sqlx::Error> {
    sqlx::query_as::<_, Komik>(
        r#"
        UPDATE komik
        SET judul = $2, pengarang = $3, stok = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING id, judul, pengarang, stok, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(judul)
    .bind(pengarang)
    .bind(stok)
    .fetch_optional(pool)
    .await
}

/// Delete a komik.
///
/// # Returns
/// true if a row was deleted
pub async fn delete_komik(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM komik WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Persist a komik's stock counter. Used by the stock broadcaster.
pub async fn save_stok(pool: &PgPool, id: i64, stok: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE komik
        SET stok = $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(stok)
    .execute(pool)
    .await?;

    Ok(())
}
