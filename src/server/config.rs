/**
 * Server Configuration
 *
 * Configuration comes from environment variables (a local `.env` file is
 * honored by the binary). `DATABASE_URL` and `JWT_SECRET` are required;
 * everything else has a default.
 *
 * | Variable               | Meaning                               | Default |
 * |------------------------|---------------------------------------|---------|
 * | `DATABASE_URL`         | PostgreSQL connection string          | -       |
 * | `JWT_SECRET`           | Token signing secret                  | -       |
 * | `SERVER_PORT`          | Listen port                           | 8081    |
 * | `WS_IDLE_TIMEOUT_SECS` | Idle limit for live connections; 0 or |         |
 * |                        | unset disables the limit              | off     |
 */

use std::time::Duration;
use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8081;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Shared secret for signing and verifying tokens
    pub jwt_secret: String,
    /// Listen port
    pub port: u16,
    /// Optional idle timeout for live stock-feed connections
    pub ws_idle_timeout: Option<Duration>,
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {0} has an invalid value: {1}")]
    Invalid(&'static str, String),
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let port = parse_port(std::env::var("SERVER_PORT").ok())?;
        let ws_idle_timeout = parse_idle_timeout(std::env::var("WS_IDLE_TIMEOUT_SECS").ok())?;

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            ws_idle_timeout,
        })
    }
}

fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid("SERVER_PORT", value)),
    }
}

fn parse_idle_timeout(raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) => {
            let secs: u64 = value
                .parse()
                .map_err(|_| ConfigError::Invalid("WS_IDLE_TIMEOUT_SECS", value))?;
            // 0 keeps the original behavior: no timeout on live connections.
            Ok((secs > 0).then(|| Duration::from_secs(secs)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), DEFAULT_PORT);
    }

    #[test]
    fn test_port_parses() {
        assert_eq!(parse_port(Some("3000".to_string())).unwrap(), 3000);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert_matches!(
            parse_port(Some("eighty".to_string())),
            Err(ConfigError::Invalid("SERVER_PORT", _))
        );
    }

    #[test]
    fn test_idle_timeout_off_by_default() {
        assert_eq!(parse_idle_timeout(None).unwrap(), None);
    }

    #[test]
    fn test_idle_timeout_zero_means_off() {
        assert_eq!(parse_idle_timeout(Some("0".to_string())).unwrap(), None);
    }

    #[test]
    fn test_idle_timeout_parses() {
        assert_eq!(
            parse_idle_timeout(Some("90".to_string())).unwrap(),
            Some(Duration::from_secs(90))
        );
    }
}
