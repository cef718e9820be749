//! Primary error enum for parser construction, parsing and dispatch.

use thiserror::Error;

/// Boxed error returned by command handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type ArgifyResult<T> = Result<T, ArgifyError>;

/// Errors that can occur while deriving or running a command-line parser.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArgifyError {
    /// Two fields resolved to the same flag token.
    #[error("flag '{flag}' of field '{field}' is already registered")]
    FlagCollision {
        /// The clashing flag token, including its leading dashes.
        flag: String,
        /// Dotted path of the field that tried to claim the flag.
        field: String,
    },

    /// A flag token cannot be expressed as a long or short option.
    #[error("invalid flag '{flag}' for field '{field}': {reason}")]
    InvalidFlag {
        /// The rejected flag token.
        flag: String,
        /// Dotted path of the field declaring the flag.
        field: String,
        /// Why the token was rejected.
        reason: &'static str,
    },

    /// A per-field extension value has the wrong type.
    #[error("extension '{key}' of field '{field}' must be {expected}")]
    InvalidExtension {
        /// Field carrying the extension.
        field: String,
        /// Extension key, for example `cli`.
        key: String,
        /// Description of the accepted value type.
        expected: &'static str,
    },

    /// A command could not be added to a registry.
    #[error("command registration failed: {message}")]
    CommandRegistration {
        /// Human-readable explanation.
        message: String,
    },

    /// A key/value token lacks the `=` separator.
    #[error("invalid key/value token '{token}': expected key=value")]
    TokenFormat {
        /// The offending token.
        token: String,
    },

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// The parsed namespace could not be converted into the schema type.
    #[error("Validation failed: {0}")]
    Validation(#[source] serde_json::Error),

    /// A dispatched command handler returned an error.
    #[error("command handler failed: {0}")]
    Handler(#[source] HandlerError),
}
