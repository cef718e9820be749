//! Derive a complete command-line parser from a typed configuration schema.
//!
//! A schema describes fields, their types, defaults, aliases and help text.
//! [`build_parser`] walks it (including inherited and nested records) and
//! registers one or more options per field on a clap-backed [`ArgParser`].
//! Parsing yields a [`Namespace`] whose shape mirrors the schema, so it can
//! be deserialized straight back into the original type.
//!
//! Schemas are usually derived:
//!
//! ```
//! use argify::{ArgParser, BuildOptions, Schema};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Schema, Deserialize)]
//! struct Config {
//!     /// Who to greet.
//!     name: String,
//!     #[argify(default = 1)]
//!     times: u32,
//!     #[argify(default = false)]
//!     shout: bool,
//! }
//!
//! let parser = ArgParser::for_schema::<Config>("greet", &BuildOptions::default())?;
//! let config: Config = parser
//!     .try_parse_from(["greet", "--name", "ada", "--enable-shout"])?
//!     .construct()?;
//! assert_eq!(config.name, "ada");
//! assert_eq!(config.times, 1);
//! assert!(config.shout);
//! # Ok::<(), argify::ArgifyError>(())
//! ```
//!
//! Applications with several entry points register them on a
//! [`CommandRegistry`] and call [`CommandRegistry::run`].

pub use argify_macros::{Describe, Schema};

mod error;
pub mod fields;
pub mod option;
pub mod parser;
pub mod registry;
pub mod schema;
pub mod shape;
pub mod synth;
pub mod walker;

pub use error::{ArgifyError, ArgifyResult, HandlerError, is_display_request};
pub use fields::{EnumeratedField, enumerate_fields, group_labels};
pub use option::{Arity, Dest, OptionAction, OptionDescriptor};
pub use parser::{ArgParser, ExclusiveGroup, GroupHandle, Namespace, Placement};
pub use registry::{CommandRegistry, Dispatched};
pub use schema::{
    CoerceFn, CustomType, DeclaredType, Describe, EnumType, FieldDescriptor, ScalarType, Schema,
    SchemaConfig, SchemaType,
};
pub use shape::{Shape, classify};
pub use synth::{SynthContext, Synthesized, derive_flag, render_name, synthesize};
pub use walker::{BuildOptions, build_parser};

/// Support code for the derive macros. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use serde_json;

    use serde::Serialize;
    use serde_json::Value;

    /// Encodes a field default, falling back to `null` for values serde
    /// cannot represent.
    pub fn default_value<T: Serialize>(value: &T) -> Value {
        serde_json::to_value(value).unwrap_or(Value::Null)
    }
}
