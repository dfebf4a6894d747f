/**
 * User Model and Database Operations
 *
 * Passwords are stored as bcrypt hashes and are never serialized into
 * responses.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User struct representing a row in the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user id
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Hashed password (bcrypt); never returned to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role id: 1 = Admin, 2 = User
    pub role_id: i64,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Get a user by username.
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, role_id, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Create a new user.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `password_hash` - Hashed password
/// * `role_id` - Role id for the new account
///
/// # Returns
/// Created user or error
pub async fn create_user(
    pool: &PgPool,
    username: String,
    password_hash: String,
    role_id: i64,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash, role_id)
        VALUES ($1, $2, $3)
        RETURNING id, username, password_hash, role_id, created_at
        "#,
    )
    .bind(&username)
    .bind(&password_hash)
    .bind(role_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
