//! Error types produced while building parsers and dispatching commands.

mod constructors;
mod conversions;
mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::{ArgifyError, ArgifyResult, HandlerError};
