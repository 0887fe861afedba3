//! Error types for the cache
//!
//! Provides unified error handling using thiserror. Lookups never fail; only
//! construction and configuration loading can.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must hold at least one entry
    #[error("Invalid capacity: max size must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// Default TTL must be a positive duration
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    /// Environment value could not be parsed
    #[error("Invalid configuration: {var}={value:?}")]
    InvalidConfig { var: String, value: String },
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
