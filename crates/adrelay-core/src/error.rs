//! Error types for the ad relay binding
//!
//! This module defines all error types used throughout the crate.

use crate::AdId;
use thiserror::Error;

/// Result type alias for ad relay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the ad relay binding
#[derive(Error, Debug)]
pub enum Error {
    /// Attempted registration of an ad id that is already tracked.
    ///
    /// This is the only error that escapes to the caller as a hard
    /// failure; the existing mapping is left untouched.
    #[error("ad for following adId already exists: {0}")]
    DuplicateAdId(AdId),

    /// SDK-related errors (object construction, listener wiring)
    #[error("SDK error: {0}")]
    Sdk(String),

    /// Bridge channel errors (outbound delivery)
    #[error("bridge error: {0}")]
    Bridge(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Binary message codec errors
    #[error("codec error: {0}")]
    Codec(#[from] crate::codec::CodecError),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an SDK error
    pub fn sdk(msg: impl Into<String>) -> Self {
        Self::Sdk(msg.into())
    }

    /// Create a bridge error
    pub fn bridge(msg: impl Into<String>) -> Self {
        Self::Bridge(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
