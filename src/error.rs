//! Error types for the cache
//!
//! Cache operations themselves never fail; errors only come out of explicit
//! validation such as [`CacheConfig::validate`](crate::CacheConfig::validate).

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
