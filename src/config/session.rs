//! Session configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Upper bound on session lifetime (30 days)
const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Which session store backs the session middleware
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    #[default]
    Memory,
    Redis,
}

/// Session cookie and lifetime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime in seconds, refreshed whenever the session changes
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Add the `Secure` attribute to the session cookie
    #[serde(default)]
    pub secure_cookie: bool,

    /// Backing store
    #[serde(default)]
    pub store: SessionStoreKind,

    /// How often the in-memory store drops expired sessions
    #[serde(default = "default_purge_interval")]
    pub purge_interval_secs: u64,
}

impl SessionConfig {
    /// Validate session configuration
    ///
    /// Production requires secure cookies.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.cookie_name.is_empty() {
            return Err(ValidationError::MissingRequired("SESSION_COOKIE_NAME"));
        }
        if !self
            .cookie_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            return Err(ValidationError::InvalidCookieName);
        }
        if self.ttl_secs == 0 || self.ttl_secs > MAX_TTL_SECS {
            return Err(ValidationError::InvalidSessionTtl);
        }
        if self.purge_interval_secs == 0 {
            return Err(ValidationError::InvalidPurgeInterval);
        }
        if *environment == Environment::Production && !self.secure_cookie {
            return Err(ValidationError::CookieMustBeSecure);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_secs: default_ttl(),
            secure_cookie: false,
            store: SessionStoreKind::default(),
            purge_interval_secs: default_purge_interval(),
        }
    }
}

fn default_cookie_name() -> String {
    "sid".to_string()
}

fn default_ttl() -> u64 {
    24 * 60 * 60
}

fn default_purge_interval() -> u64 {
    60
}
