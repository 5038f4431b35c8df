//! Error types for Rackyard operations.
//!
//! This module provides the main error type [`RackyardError`]. A layout
//! calculation either returns a complete layout or exactly one of these
//! errors; partial layouts are never returned.

use std::io;

use thiserror::Error;

/// The main error type for Rackyard operations.
///
/// Every variant carries a human-readable message that a front end can show
/// as-is or translate into its own failure convention.
#[derive(Debug, Error)]
pub enum RackyardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration could not be read into the expected shape.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration is well-formed but describes an impossible layout,
    /// such as zero workstations, rows or floors.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A measurement was rejected by strict unit normalization.
    #[error("Unit error: {0}")]
    Unit(String),

    /// A derived extent was negative and negative geometry is rejected.
    #[error("Geometry error: {0}")]
    Geometry(String),
}

impl From<serde_json::Error> for RackyardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_prefix() {
        let err = RackyardError::Validation("num_rows must be greater than zero".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: num_rows must be greater than zero"
        );
    }

    #[test]
    fn test_json_errors_become_config_errors() {
        let json_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = RackyardError::from(json_err);
        assert!(matches!(err, RackyardError::Config(_)));
    }
}
