//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SESSION_API` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use session_api::config::AppConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     config.validate()?;
//!
//!     println!("Server running on {}", config.server.socket_addr()?);
//!     Ok(())
//! }
//! ```

mod database;
mod error;
mod redis;
mod server;
mod session;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use self::redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use session::{SessionConfig, SessionStoreKind};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Session cookie, lifetime and store selection
    #[serde(default)]
    pub session: SessionConfig,

    /// Database configuration (PostgreSQL user directory)
    pub database: DatabaseConfig,

    /// Redis configuration, required when `session.store = redis`
    #[serde(default)]
    pub redis: Option<RedisConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SESSION_API` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SESSION_API__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SESSION_API__SESSION__STORE=redis` -> `session.store = redis`
    /// - `SESSION_API__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SESSION_API")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid, or
    /// if the Redis session store is selected without a Redis section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.session.validate(&self.server.environment)?;
        self.database.validate()?;

        match (&self.session.store, &self.redis) {
            (SessionStoreKind::Redis, None) => {
                return Err(ValidationError::MissingRequired("REDIS_URL"))
            }
            (_, Some(redis)) => redis.validate()?,
            (SessionStoreKind::Memory, None) => {}
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
