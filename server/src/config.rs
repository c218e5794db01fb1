//! Server configuration parsed from environment variables.
//!
//! Variables (all optional; a `.env` file is honoured via `dotenvy`):
//! - `DATABASE_URL`: `SQLite` URL, default `sqlite://drawings.db`
//! - `PORT`: listen port, default 4000
//! - `DB_MAX_CONNECTIONS`: pool size, default 5
//!
//! `RUST_LOG` is read by the tracing subscriber, not here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://drawings.db";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
}

impl ServerConfig {
    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build config from an arbitrary variable source. Unset or blank values
    /// take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a numeric variable does not parse or
    /// the pool size is zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
        let port = parse_var("PORT", lookup("PORT").as_deref(), DEFAULT_PORT)?;
        let max_connections =
            parse_var("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS").as_deref(), DEFAULT_DB_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", value: "0".into() });
        }

        Ok(Self { database_url, port, max_connections })
    }
}

fn parse_var<T: FromStr>(var: &'static str, raw: Option<&str>, default: T) -> Result<T, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: value.to_owned() }),
    }
}
