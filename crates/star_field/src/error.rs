//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover invalid configuration, rejected viewport dimensions, and use
//! after teardown.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid viewport dimensions {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("field has been torn down")]
    TornDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_viewport_reports_dimensions() {
        let err = Error::InvalidViewport {
            width: 0.0,
            height: -2.0,
        };
        assert_eq!(err.to_string(), "invalid viewport dimensions 0x-2");
    }

    #[test]
    fn invalid_config_carries_message() {
        let err = Error::InvalidConfig("width_ratio must be > 0".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: width_ratio must be > 0"
        );
    }
}
