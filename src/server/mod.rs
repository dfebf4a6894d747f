/**
 * Server Bootstrap
 *
 * Configuration loading, shared application state, and initialization of
 * the Axum application.
 */

pub mod config;
pub mod init;
pub mod state;
