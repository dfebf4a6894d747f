/**
 * Access Control Gate
 *
 * This middleware protects routes that require authentication. It extracts
 * and verifies the JWT bearer token from the Authorization header, checks
 * the caller's role and attaches the identity to the request for handlers.
 *
 * The gate rejects before any handler runs:
 * 1. Missing header -> 401 (missing credential)
 * 2. Header without a `Bearer ` prefix -> 401 (malformed credential)
 * 3. Bad signature, expired token, missing/mistyped claims -> 401 (invalid)
 * 4. Role outside the route's allow-list -> 403 (forbidden)
 *
 * Verification is pure computation over the token; the gate is stateless
 * and performs no I/O. For the WebSocket route it runs during the upgrade
 * request, so every live connection is authenticated before registration.
 *
 * Per-handler role requirements are expressed with the `RequireAdmin`,
 * `RequireUser` and `Authenticated` extractors, which read the identity the
 * gate stored in the request extensions.
 */

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::tokens::verify_token;
use crate::auth::Role;
use crate::error::AuthError;
use crate::server::state::AppState;

/// Every role the service knows about. Used by the `authenticate` layer;
/// route-specific narrowing happens in the extractors below.
pub const ALL_ROLES: &[Role] = &[Role::Admin, Role::User];

/// Authenticated identity extracted from a verified token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub role: Role,
}

/// Validate a bearer credential against a role allow-list.
///
/// # Arguments
/// * `header` - Raw `Authorization` header value, if any
/// * `allowed` - Roles permitted for the route
/// * `secret` - Token signing secret
///
/// # Returns
/// The caller's identity, or the `AuthError` describing the rejection.
pub fn authorize(
    header: Option<&str>,
    allowed: &[Role],
    secret: &str,
) -> Result<CurrentUser, AuthError> {
    let header = header.ok_or(AuthError::MissingCredential)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedCredential)?;

    let claims = verify_token(token, secret).map_err(|e| {
        tracing::warn!("Rejected token: {}", e);
        AuthError::InvalidCredential
    })?;

    // A numeric role id outside the known set is treated like any other
    // role that is not on the allow-list.
    let role = Role::try_from(claims.role_id).map_err(|id| {
        tracing::warn!("Token carries unknown role id {}", id);
        AuthError::Forbidden
    })?;

    if !allowed.contains(&role) {
        return Err(AuthError::Forbidden);
    }

    Ok(CurrentUser {
        user_id: claims.user_id,
        role,
    })
}

/// Authentication middleware
///
/// Verifies the bearer token and inserts a `CurrentUser` into the request
/// extensions. Returns the appropriate 401/403 rejection otherwise.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let user = authorize(header, ALL_ROLES, &state.config.jwt_secret)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn current_user(parts: &Parts) -> Result<CurrentUser, AuthError> {
    parts.extensions.get::<CurrentUser>().copied().ok_or_else(|| {
        tracing::warn!("CurrentUser not found in request extensions");
        AuthError::MissingCredential
    })
}

/// Extractor for routes open to any authenticated role.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub CurrentUser);

/// Extractor for admin-only routes.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub CurrentUser);

/// Extractor for routes reserved to regular users.
#[derive(Debug, Clone, Copy)]
pub struct RequireUser(pub CurrentUser);

impl<S: Send + Sync> FromRequestParts<S> for Authenticated {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_user(parts)?))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)?;
        if user.role != Role::Admin {
            return Err(AuthError::Forbidden);
        }
        Ok(Self(user))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequireUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = current_user(parts)?;
        if user.role != Role::User {
            return Err(AuthError::Forbidden);
        }
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::tokens::create_token;
    use assert_matches::assert_matches;

    const SECRET: &str = "gate-test-secret";

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    #[test]
    fn test_missing_header_rejected() {
        let result = authorize(None, ALL_ROLES, SECRET);
        assert_matches!(result, Err(AuthError::MissingCredential));
    }

    #[test]
    fn test_malformed_header_rejected() {
        let token = create_token(1, 1, SECRET).unwrap();
        let result = authorize(Some(&token), ALL_ROLES, SECRET);
        assert_matches!(result, Err(AuthError::MalformedCredential));

        let result = authorize(Some("Basic dXNlcjpwYXNz"), ALL_ROLES, SECRET);
        assert_matches!(result, Err(AuthError::MalformedCredential));
    }

    #[test]
    fn test_invalid_signature_rejected() {
        let token = create_token(1, 1, "other-secret").unwrap();
        let result = authorize(Some(&bearer(&token)), ALL_ROLES, SECRET);
        assert_matches!(result, Err(AuthError::InvalidCredential));
    }

    #[test]
    fn test_valid_token_wrong_role_forbidden() {
        let token = create_token(5, Role::User.as_id(), SECRET).unwrap();
        let result = authorize(Some(&bearer(&token)), &[Role::Admin], SECRET);
        assert_matches!(result, Err(AuthError::Forbidden));
    }

    #[test]
    fn test_unknown_role_id_forbidden() {
        let token = create_token(5, 99, SECRET).unwrap();
        let result = authorize(Some(&bearer(&token)), ALL_ROLES, SECRET);
        assert_matches!(result, Err(AuthError::Forbidden));
    }

    #[test]
    fn test_valid_token_allowed_role() {
        let token = create_token(42, Role::Admin.as_id(), SECRET).unwrap();
        let user = authorize(Some(&bearer(&token)), &[Role::Admin], SECRET).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn test_user_role_passes_shared_routes() {
        let token = create_token(7, Role::User.as_id(), SECRET).unwrap();
        let user = authorize(Some(&bearer(&token)), ALL_ROLES, SECRET).unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.role, Role::User);
    }
}
