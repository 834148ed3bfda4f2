//! Redis configuration (session store)

use serde::Deserialize;

use super::error::ValidationError;

/// Redis configuration used by the Redis session store
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,

    /// Prefix prepended to every session key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl RedisConfig {
    /// Validate Redis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("REDIS_URL"));
        }
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.key_prefix.is_empty() {
            return Err(ValidationError::MissingRequired("REDIS_KEY_PREFIX"));
        }
        Ok(())
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_key_prefix() -> String {
    crate::adapters::session_store::DEFAULT_KEY_PREFIX.to_string()
}
