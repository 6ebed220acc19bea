//! Configuration Module
//!
//! Sizing and default TTL for a cache instance. Hosts usually embed
//! [`CacheConfig`] inside their own configuration files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Default maximum number of entries
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default TTL applied by `set_default`
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// TTL used for entries stored without an explicit one
    pub default_ttl: Duration,
}

impl CacheConfig {
    /// Creates a config with the given capacity and the default TTL.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Sets the default TTL.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Rejects configurations that would build a degenerate cache.
    ///
    /// A zero capacity is allowed by [`Cache::new`](crate::Cache::new) (the
    /// cache then never retains anything) but refused here.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_ttl: DEFAULT_TTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.default_ttl, Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::with_capacity(5).default_ttl(Duration::from_secs(2));
        assert_eq!(config.capacity, 5);
        assert_eq!(config.default_ttl, Duration::from_secs(2));
    }

    #[test]
    fn test_config_zero_capacity_rejected() {
        let config = CacheConfig::with_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }
}
