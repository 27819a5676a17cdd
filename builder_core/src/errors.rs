//! # Error Types
//!
//! Structured error types for builder_core. Every failure the estimator can
//! produce is a variant of [`BuildError`], and each variant is either
//! *recoverable* (the shell asks the same question again) or *fatal* (the
//! session ends).
//!
//! ## Example
//!
//! ```rust
//! use builder_core::errors::{BuildError, BuildResult};
//!
//! fn parse_floors(answer: &str) -> BuildResult<u32> {
//!     answer
//!         .trim()
//!         .parse()
//!         .map_err(|_| BuildError::invalid_input("num_floors", answer, "Expected a whole number"))
//! }
//!
//! let err = parse_floors("two").unwrap_err();
//! assert!(err.is_recoverable());
//! assert_eq!(err.error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for builder_core operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Structured error type for estimate operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BuildError {
    /// Construction type is not `House` or `Building`
    #[error("Invalid construction type entered: '{value}' (expected House or Building)")]
    InvalidConstructionType { value: String },

    /// Room type is not one of the known room kinds
    #[error("Invalid room type entered: '{value}' (expected LivingRoom, Kitchen or GuestRoom)")]
    InvalidRoomType { value: String },

    /// Construction area lies outside the allowed range for its kind
    #[error("{kind} area should be between {min} and {max} square meters (got {value})")]
    AreaOutOfRange {
        kind: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Color scheme is empty or contains non-alphabetic characters
    #[error("Invalid color scheme '{value}': please enter alphabetic characters only")]
    InvalidColorScheme { value: String },

    /// An answer could not be interpreted (not a number, negative count, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The input provider has no more answers
    #[error("Input closed while waiting for {awaiting}")]
    InputClosed { awaiting: String },

    /// Settings file could not be read or parsed
    #[error("Settings error: '{path}' - {reason}")]
    SettingsError { path: String, reason: String },
}

impl BuildError {
    /// Create an InvalidConstructionType error
    pub fn invalid_construction_type(value: impl Into<String>) -> Self {
        BuildError::InvalidConstructionType {
            value: value.into(),
        }
    }

    /// Create an InvalidRoomType error
    pub fn invalid_room_type(value: impl Into<String>) -> Self {
        BuildError::InvalidRoomType {
            value: value.into(),
        }
    }

    /// Create an AreaOutOfRange error
    pub fn area_out_of_range(kind: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        BuildError::AreaOutOfRange {
            kind: kind.into(),
            value,
            min,
            max,
        }
    }

    /// Create an InvalidColorScheme error
    pub fn invalid_color_scheme(value: impl Into<String>) -> Self {
        BuildError::InvalidColorScheme {
            value: value.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        BuildError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InputClosed error
    pub fn input_closed(awaiting: impl Into<String>) -> Self {
        BuildError::InputClosed {
            awaiting: awaiting.into(),
        }
    }

    /// Create a SettingsError
    pub fn settings_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        BuildError::SettingsError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable (the same question may be asked again)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BuildError::AreaOutOfRange { .. }
                | BuildError::InvalidColorScheme { .. }
                | BuildError::InvalidInput { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BuildError::InvalidConstructionType { .. } => "INVALID_CONSTRUCTION_TYPE",
            BuildError::InvalidRoomType { .. } => "INVALID_ROOM_TYPE",
            BuildError::AreaOutOfRange { .. } => "AREA_OUT_OF_RANGE",
            BuildError::InvalidColorScheme { .. } => "INVALID_COLOR_SCHEME",
            BuildError::InvalidInput { .. } => "INVALID_INPUT",
            BuildError::InputClosed { .. } => "INPUT_CLOSED",
            BuildError::SettingsError { .. } => "SETTINGS_ERROR",
        }
    }
}
