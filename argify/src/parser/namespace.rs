//! Parsed values and their reconstruction into typed configuration.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::ArgifyResult;

/// Values produced by one parse, keyed by destination.
///
/// Dotted destinations are already assembled into nested objects, so the
/// namespace has the shape of the schema it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    values: Map<String, Value>,
}

impl Namespace {
    pub(crate) const fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Looks up a value by dotted path, for example `child.age`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argify::{ArgParser, FieldDescriptor, SchemaType, BuildOptions, build_parser};
    ///
    /// let child = SchemaType::new("Child").with_field(FieldDescriptor::of::<u32>("age").with_default(10));
    /// let schema = SchemaType::new("Config")
    ///     .with_field(FieldDescriptor::new("child", argify::DeclaredType::record(child)));
    /// let parser = build_parser(ArgParser::new("demo"), Some(&schema), &BuildOptions::default())?;
    ///
    /// let ns = parser.try_parse_from(["demo", "--child.age", "5"])?;
    /// assert_eq!(ns.get("child.age"), Some(&serde_json::json!(5)));
    /// # Ok::<(), argify::ArgifyError>(())
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = self.values.get(segments.next()?)?;
        segments.try_fold(first, |current, key| current.as_object()?.get(key))
    }

    /// All top-level entries.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Converts the namespace into a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }

    /// Deserializes the namespace into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::Validation`](crate::ArgifyError::Validation)
    /// when the parsed values do not satisfy `T`.
    pub fn construct<T: DeserializeOwned>(&self) -> ArgifyResult<T> {
        Ok(serde_json::from_value(Value::Object(self.values.clone()))?)
    }

    /// Deserializes the namespace into `T`, consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::Validation`](crate::ArgifyError::Validation)
    /// when the parsed values do not satisfy `T`.
    pub fn into_construct<T: DeserializeOwned>(self) -> ArgifyResult<T> {
        Ok(serde_json::from_value(self.into_value())?)
    }
}
