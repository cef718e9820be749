//! Constructors for `ArgifyError`.

use super::{ArgifyError, HandlerError};

impl ArgifyError {
    /// Construct a [`ArgifyError::FlagCollision`].
    ///
    /// # Examples
    ///
    /// ```
    /// use argify::ArgifyError;
    /// let err = ArgifyError::flag_collision("--name", "name");
    /// assert_eq!(err.to_string(), "flag '--name' of field 'name' is already registered");
    /// ```
    #[must_use]
    pub fn flag_collision(flag: impl Into<String>, field: impl Into<String>) -> Self {
        Self::FlagCollision {
            flag: flag.into(),
            field: field.into(),
        }
    }

    /// Construct a [`ArgifyError::InvalidFlag`].
    #[must_use]
    pub fn invalid_flag(
        flag: impl Into<String>,
        field: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidFlag {
            flag: flag.into(),
            field: field.into(),
            reason,
        }
    }

    /// Construct a [`ArgifyError::InvalidExtension`].
    #[must_use]
    pub fn invalid_extension(
        field: impl Into<String>,
        key: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidExtension {
            field: field.into(),
            key: key.into(),
            expected,
        }
    }

    /// Construct a [`ArgifyError::CommandRegistration`].
    ///
    /// # Examples
    ///
    /// ```
    /// use argify::ArgifyError;
    /// let err = ArgifyError::registration("only one command is allowed");
    /// assert!(matches!(err, ArgifyError::CommandRegistration { .. }));
    /// ```
    #[must_use]
    pub fn registration(message: impl Into<String>) -> Self {
        Self::CommandRegistration {
            message: message.into(),
        }
    }

    /// Wrap a handler failure.
    #[must_use]
    pub fn handler(source: impl Into<HandlerError>) -> Self {
        Self::Handler(source.into())
    }

    /// Returns the wrapped [`clap::Error`] when this is a parse failure.
    #[must_use]
    pub fn as_clap(&self) -> Option<&clap::Error> {
        match self {
            Self::CliParsing(err) => Some(&**err),
            _ => None,
        }
    }
}
