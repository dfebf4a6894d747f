/**
 * Error Handling
 *
 * This module defines the error taxonomy for the backend and how each error
 * maps to an HTTP response.
 */

pub mod types;

pub use types::{ApiError, AuthError};
