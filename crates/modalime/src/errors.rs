//! # Error Types
//!
//! ## Overview
//!
//! This module contains the error type that groups together the more specific errors returned by
//! components in this crate.
//!
//! The composition logic itself never fails: malformed ranges are accepted as-is, and positions
//! that fall outside of the composing text are reported as absent rather than as errors.
use crate::config::ConfigError;
use crate::key::DecodeError;
use crate::types::{HandleError, RangeError};

/// Errors returned while servicing platform text-input requests.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    /// The platform passed the wrong kind of handle.
    #[error("Invalid handle: {0}")]
    Handle(#[from] HandleError),

    /// The platform passed a range that can't be represented.
    #[error("Invalid range: {0}")]
    Range(#[from] RangeError),

    /// Failure to decode bytes sent to the editor.
    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    /// Failure due to invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Common result type for bridge operations.
pub type BridgeResult<V> = Result<V, BridgeError>;
