//! Service configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is loaded first, if present. Every variable has a
//! default, so a bare `cargo run --bin user-service` talks to a local PostgreSQL.
//!
//! # Environment Variables
//!
//! ## Database
//! - `DB_HOST` - PostgreSQL host (default: localhost)
//! - `DB_PORT` - PostgreSQL port (default: 5432)
//! - `DB_USER` - PostgreSQL user (default: postgres)
//! - `DB_PASSWORD` - PostgreSQL password (default: postgres)
//! - `DB_NAME` - Database name (default: userdb / menudb / orderdb)
//!
//! ## RPC listener
//! - `RPC_HOST` - Bind address (default: 0.0.0.0)
//! - `RPC_PORT` - Listen port (default: 50051 / 50052 / 50053)
//!
//! ## Storage
//! - `STORE_BACKEND` - `postgres` (default) or `memory`
//!
//! ## Peers (order service only)
//! - `USER_SERVICE_ADDR` - User service address (default: localhost:50051)
//! - `MENU_SERVICE_ADDR` - Menu service address (default: localhost:50052)

use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which of the three services is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    User,
    Menu,
    Order,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::User => "user-service",
            ServiceKind::Menu => "menu-service",
            ServiceKind::Order => "order-service",
        }
    }

    fn default_database(self) -> &'static str {
        match self {
            ServiceKind::User => "userdb",
            ServiceKind::Menu => "menudb",
            ServiceKind::Order => "orderdb",
        }
    }

    fn default_port(self) -> u16 {
        match self {
            ServiceKind::User => 50051,
            ServiceKind::Menu => 50052,
            ServiceKind::Order => 50053,
        }
    }
}

/// Where a service keeps its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// An in-process actor store. Rows are lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("expected `postgres` or `memory`, got `{other}`")),
        }
    }
}

/// PostgreSQL connection settings.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// Addresses of the services the order service calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerConfig {
    pub user_service_addr: String,
    pub menu_service_addr: String,
}

/// Everything one service binary needs to start.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub kind: ServiceKind,
    /// IP address to bind the RPC listener to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    pub backend: StoreBackend,
    pub database: DatabaseConfig,
    /// Present for the order service only.
    pub peers: Option<PeerConfig>,
}

impl ServiceConfig {
    /// Load configuration from the process environment (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env(kind: ServiceKind) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(kind, |key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    pub fn from_lookup<F>(kind: ServiceKind, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig {
            host: get_env_or_default(&lookup, "DB_HOST", "localhost"),
            port: parse_env_or_default(&lookup, "DB_PORT", 5432)?,
            user: get_env_or_default(&lookup, "DB_USER", "postgres"),
            password: get_env_or_default(&lookup, "DB_PASSWORD", "postgres"),
            name: get_env_or_default(&lookup, "DB_NAME", kind.default_database()),
        };

        let peers = (kind == ServiceKind::Order).then(|| PeerConfig {
            user_service_addr: get_env_or_default(&lookup, "USER_SERVICE_ADDR", "localhost:50051"),
            menu_service_addr: get_env_or_default(&lookup, "MENU_SERVICE_ADDR", "localhost:50052"),
        });

        Ok(Self {
            kind,
            host: parse_env_or_default(&lookup, "RPC_HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_env_or_default(&lookup, "RPC_PORT", kind.default_port())?,
            backend: parse_env_or_default(&lookup, "STORE_BACKEND", StoreBackend::Postgres)?,
            database,
            peers,
        })
    }

    /// Socket address for the RPC listener.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
