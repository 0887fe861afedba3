//! Configuration Module
//!
//! Handles loading and validating cache construction parameters.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Environment variable holding the maximum number of entries.
pub const MAX_SIZE_VAR: &str = "CACHE_MAX_SIZE";
/// Environment variable holding the default TTL in seconds.
pub const DEFAULT_TTL_VAR: &str = "CACHE_DEFAULT_TTL";

const DEFAULT_MAX_SIZE: usize = 100;
const DEFAULT_TTL_SECS: u64 = 300;

/// Cache construction parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// TTL applied to entries stored without an explicit TTL
    #[serde(with = "duration_secs")]
    pub default_ttl: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 300)
    ///
    /// Unset variables fall back to the defaults; set but malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_size = parse_var(&lookup, MAX_SIZE_VAR)?.unwrap_or(DEFAULT_MAX_SIZE);
        let ttl_secs = parse_var(&lookup, DEFAULT_TTL_VAR)?.unwrap_or(DEFAULT_TTL_SECS);

        let config = Self {
            max_size,
            default_ttl: Duration::from_secs(ttl_secs),
        };
        config.validate()?;
        Ok(config)
    }

    // == Validate ==
    /// Rejects parameters that would leave eviction or expiry undefined.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidCapacity(self.max_size));
        }
        if self.default_ttl.is_zero() {
            return Err(CacheError::InvalidTtl(
                "default TTL must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            default_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CacheError::InvalidConfig {
                var: var.to_string(),
                value: raw,
            }),
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
