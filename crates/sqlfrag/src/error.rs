//! Error types for sqlfrag

use crate::kind::ClauseKind;
use thiserror::Error;

/// Result type alias for strict-mode operations
pub type FragResult<T> = Result<T, FragError>;

/// Errors reported by strict rendering (`try_call`) and configuration loading.
///
/// The default `call` API never produces these: malformed input renders
/// malformed SQL instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FragError {
    /// An argument shape the builder does not render
    #[error("Unsupported {argument} argument for {kind} clause")]
    UnsupportedArgument {
        kind: ClauseKind,
        argument: &'static str,
    },

    /// More than one map passed in a single call
    #[error("Only one map argument is rendered per call, got {0}")]
    MultipleMaps(usize),

    /// A map was passed but the first argument is not a map
    #[error("Map argument must be the first argument of the call")]
    MapNotFirst,

    /// Map key that cannot be safely backtick-quoted
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Binding name already present in the builder
    #[error("Placeholder ':{0}' is already bound")]
    PlaceholderCollision(String),

    /// Kind without a registered template
    #[error("No template registered for {0} clause")]
    UnregisteredKind(ClauseKind),

    /// Single-use builder called again
    #[error("Single-use {0} builder was already rendered")]
    Reused(ClauseKind),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bindings could not be converted to JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FragError {
    /// Create an unsupported-argument error
    pub fn unsupported(kind: ClauseKind, argument: &'static str) -> Self {
        Self::UnsupportedArgument { kind, argument }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a placeholder collision
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::PlaceholderCollision(_))
    }

    /// Check if this error rejects the shape of the call arguments
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedArgument { .. } | Self::MultipleMaps(_) | Self::MapNotFirst
        )
    }
}

impl From<serde_json::Error> for FragError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
