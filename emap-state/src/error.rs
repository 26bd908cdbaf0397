/// Error types for state transitions
use thiserror::Error;

/// Errors raised while decoding or applying an action.
///
/// These indicate a bug in the dispatching code rather than a runtime
/// condition, so callers are expected to surface them, not retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// `electricityMixMode` was set to something other than
    /// `consumption` or `production`
    #[error("Unknown electricityMixMode \"{0}\"")]
    InvalidMixMode(String),

    /// A known state key received a value of the wrong type
    #[error("Invalid value for \"{key}\": expected {expected}, got {value}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        value: serde_json::Value,
    },

    /// The action could not be decoded at all
    #[error("Malformed action: {0}")]
    MalformedAction(String),
}

/// Type alias for Results using StateError
pub type Result<T> = std::result::Result<T, StateError>;
