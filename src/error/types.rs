/**
 * Backend Error Types
 *
 * Two error families cover the whole service:
 *
 * - `AuthError` - produced by the access control gate before a request
 *   reaches any handler. Credential problems map to 401, a valid credential
 *   with an insufficient role maps to 403.
 * - `ApiError` - produced by request handlers. Client-caused failures keep
 *   their message; server-side failures (database, token issuance, hashing)
 *   are logged and collapsed to a generic 500 body.
 *
 * Failures on the broadcast path (missing komik, storage write failure,
 * per-connection delivery failure) never surface as HTTP responses; they are
 * logged and swallowed inside the stock broadcaster.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors produced by the bearer-token gate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header was sent.
    #[error("authorization header is missing")]
    MissingCredential,

    /// The header is present but is not a `Bearer <token>` value.
    #[error("authorization header is not a bearer token")]
    MalformedCredential,

    /// Bad signature, expired token, or missing/mistyped claims.
    #[error("token is invalid or expired")]
    InvalidCredential,

    /// The token is valid but the role is not allowed for this resource.
    #[error("insufficient role for this resource")]
    Forbidden,
}

impl AuthError {
    /// HTTP status for this rejection.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::MalformedCredential | Self::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

/// Errors produced by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The caller is authenticated but may not perform this operation.
    #[error("{0}")]
    Forbidden(&'static str),

    /// The request body failed validation.
    #[error("{0}")]
    Validation(&'static str),

    /// The request conflicts with existing state (e.g. duplicate username).
    #[error("{0}")]
    Conflict(&'static str),

    /// Unknown user or wrong password. One message for both cases so the
    /// response does not reveal which usernames exist.
    #[error("invalid username or password")]
    InvalidLogin,

    /// Database query failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Token creation failure.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing or verification failure.
    #[error("password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidLogin => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Token(_) | Self::Hash(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures keep their detail in the log, not the body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            AuthError::MissingCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::MalformedCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("komik").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Forbidden("no").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("taken").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InvalidLogin.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_login_error_does_not_leak_detail() {
        // Unknown user and wrong password must produce the same message.
        assert_eq!(
            ApiError::InvalidLogin.to_string(),
            "invalid username or password"
        );
    }
}
