//! Conversions between external error types and `ArgifyError`.

use super::ArgifyError;

impl From<clap::Error> for ArgifyError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}

impl From<serde_json::Error> for ArgifyError {
    /// Reconstruction failures are reported as validation errors.
    fn from(e: serde_json::Error) -> Self {
        Self::Validation(e)
    }
}
