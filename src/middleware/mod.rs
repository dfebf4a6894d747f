/**
 * Request Middleware
 *
 * Contains the bearer-token authentication gate applied to protected routes.
 */

pub mod auth;

pub use auth::{authenticate, Authenticated, CurrentUser, RequireAdmin, RequireUser};
