/**
 * Authentication Handlers
 *
 * Implements `POST /login` and `POST /register`.
 *
 * # Security
 *
 * - Passwords are verified with bcrypt (constant-time comparison)
 * - Unknown username and wrong password return the same 401 response to
 *   prevent user enumeration
 * - Tokens are HS256-signed with a 24-hour expiry and carry the numeric
 *   user id and role id
 */

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::tokens::create_token;
use crate::auth::users::{create_user, get_user_by_username};
use crate::auth::Role;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login request
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    /// Plaintext password, verified against the stored bcrypt hash
    pub password: String,
}

/// Login response, containing the signed bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Registration request
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// User data safe to return to clients (no password hash)
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role_id: i64,
}

/// Login handler
///
/// Looks up the user, verifies the password and returns a signed token.
///
/// # Errors
///
/// * `401 Unauthorized` - unknown user or wrong password (same body either way)
/// * `500 Internal Server Error` - database, hashing or signing failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.username);

    let user = get_user_by_username(&state.pool, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed, user not found: {}", request.username);
            ApiError::InvalidLogin
        })?;

    let valid = bcrypt::verify(&request.password, &user.password_hash)?;
    if !valid {
        tracing::warn!("Login failed, wrong password for: {}", request.username);
        return Err(ApiError::InvalidLogin);
    }

    let token = create_token(user.id, user.role_id, &state.config.jwt_secret)?;

    tracing::info!("User logged in: {} (id {})", user.username, user.id);

    Ok(Json(LoginResponse {
        message: "login successful".to_string(),
        token,
    }))
}

/// Registration handler
///
/// Creates a regular user account (role 2). Admin accounts are provisioned
/// directly in the database.
///
/// # Errors
///
/// * `400 Bad Request` - empty username or password shorter than 8 characters
/// * `409 Conflict` - username already taken
/// * `500 Internal Server Error` - database or hashing failure
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if request.username.trim().is_empty() {
        return Err(ApiError::Validation("username must not be empty"));
    }
    if request.password.len() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters",
        ));
    }

    if get_user_by_username(&state.pool, &request.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("username already taken"));
    }

    let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)?;
    let user = create_user(
        &state.pool,
        request.username,
        password_hash,
        Role::User.as_id(),
    )
    .await?;

    tracing::info!("User registered: {} (id {})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
            role_id: user.role_id,
        }),
    ))
}
