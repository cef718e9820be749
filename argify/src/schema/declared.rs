//! Declared field types as reported by schema introspection.
//!
//! [`DeclaredType`] is the raw type information a [`Describe`](super::Describe)
//! implementation hands over. It is deliberately richer than the
//! [`Shape`](crate::Shape) it is later classified into: unions, optional
//! wrappers and element types are kept so the classifier can apply its
//! precedence rules in one place.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Number, Value};

use super::SchemaType;

/// Coercion function turning a raw token into a JSON value.
pub type CoerceFn = fn(&str) -> Result<Value, String>;

/// Type information for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    /// No type information is available.
    Any,
    /// A single scalar value.
    Scalar(ScalarType),
    /// An ordered, homogeneous collection.
    Sequence(Box<DeclaredType>),
    /// An unordered collection of unique values.
    Set(Box<DeclaredType>),
    /// A key/value mapping.
    Mapping {
        /// Declared key type. Keys always arrive as strings.
        key: Box<DeclaredType>,
        /// Declared value type.
        value: Box<DeclaredType>,
    },
    /// A fixed-size tuple.
    Tuple(Vec<DeclaredType>),
    /// A closed enumeration of named variants.
    Enum(EnumType),
    /// A fixed set of allowed literal values.
    Literal(Vec<Value>),
    /// One of several alternative types.
    Union(Vec<DeclaredType>),
    /// A value that may be absent.
    Optional(Box<DeclaredType>),
    /// The unit / null type.
    Null,
    /// A nested schema.
    Record(Arc<SchemaType>),
}

impl DeclaredType {
    /// Shorthand for `DeclaredType::Scalar(ScalarType::Str)`.
    #[must_use]
    pub const fn string() -> Self {
        Self::Scalar(ScalarType::Str)
    }

    /// Wraps `inner` in a [`DeclaredType::Sequence`].
    #[must_use]
    pub fn sequence(inner: Self) -> Self {
        Self::Sequence(Box::new(inner))
    }

    /// Wraps `inner` in a [`DeclaredType::Set`].
    #[must_use]
    pub fn set(inner: Self) -> Self {
        Self::Set(Box::new(inner))
    }

    /// Builds a string-keyed [`DeclaredType::Mapping`].
    #[must_use]
    pub fn mapping(value: Self) -> Self {
        Self::Mapping {
            key: Box::new(Self::string()),
            value: Box::new(value),
        }
    }

    /// Wraps `inner` in a [`DeclaredType::Optional`].
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Builds a [`DeclaredType::Record`] for a nested schema.
    #[must_use]
    pub fn record(schema: SchemaType) -> Self {
        Self::Record(Arc::new(schema))
    }

    /// Builds a [`DeclaredType::Literal`] from string choices.
    #[must_use]
    pub fn literal<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Literal(values.into_iter().map(|v| Value::String(v.into())).collect())
    }
}

/// Scalar value types and their token coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarType {
    /// Arbitrary text.
    Str,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    UInt,
    /// Floating point number.
    Float,
    /// Boolean.
    Bool,
    /// Single character.
    Char,
    /// Filesystem path, kept as text.
    Path,
    /// A JSON document.
    Json,
    /// A type with its own coercion function.
    Custom(CustomType),
}

impl ScalarType {
    /// Short name used in value placeholders and logs.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Path => "path",
            Self::Json => "json",
            Self::Custom(custom) => custom.name(),
        }
    }

    /// Converts one command-line token into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when `raw` is not a valid value of
    /// this type.
    ///
    /// # Examples
    ///
    /// ```
    /// use argify::ScalarType;
    /// use serde_json::json;
    ///
    /// assert_eq!(ScalarType::Int.coerce("-3"), Ok(json!(-3)));
    /// assert_eq!(ScalarType::Bool.coerce("yes"), Ok(json!(true)));
    /// assert!(ScalarType::UInt.coerce("-3").is_err());
    /// ```
    pub fn coerce(&self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Str | Self::Path => Ok(Value::String(raw.to_owned())),
            Self::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| format!("invalid integer: {e}")),
            Self::UInt => raw
                .trim()
                .parse::<u64>()
                .map(Value::from)
                .map_err(|e| format!("invalid unsigned integer: {e}")),
            Self::Float => {
                let parsed = raw
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid number: {e}"))?;
                Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| "non-finite numbers are not supported".to_owned())
            }
            Self::Bool => parse_bool(raw).map(Value::Bool),
            Self::Char => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::String(c.to_string())),
                    _ => Err("expected exactly one character".to_owned()),
                }
            }
            Self::Json => serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}")),
            Self::Custom(custom) => custom.coerce(raw),
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Ok(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Ok(false),
        other => Err(format!("invalid boolean '{other}'")),
    }
}

/// A named scalar type with a caller-supplied coercion function.
#[derive(Clone)]
pub struct CustomType {
    name: String,
    coerce: CoerceFn,
}

impl CustomType {
    /// Creates a custom type from a coercion function.
    #[must_use]
    pub fn new(name: impl Into<String>, coerce: CoerceFn) -> Self {
        Self {
            name: name.into(),
            coerce,
        }
    }

    /// Creates a custom type parsed with [`FromStr`] and re-encoded with
    /// [`Serialize`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::IpAddr;
    /// use argify::CustomType;
    ///
    /// let ip = CustomType::parsed::<IpAddr>("IpAddr");
    /// assert_eq!(ip.coerce("127.0.0.1"), Ok(serde_json::json!("127.0.0.1")));
    /// assert!(ip.coerce("localhost").is_err());
    /// ```
    #[must_use]
    pub fn parsed<T>(name: impl Into<String>) -> Self
    where
        T: FromStr + Serialize,
        T::Err: fmt::Display,
    {
        Self::new(name, coerce_parsed::<T>)
    }

    /// Type name shown in logs and placeholders.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the coercion function.
    ///
    /// # Errors
    ///
    /// Propagates the coercion function's rejection message.
    pub fn coerce(&self, raw: &str) -> Result<Value, String> {
        (self.coerce)(raw)
    }
}

fn coerce_parsed<T>(raw: &str) -> Result<Value, String>
where
    T: FromStr + Serialize,
    T::Err: fmt::Display,
{
    let parsed = raw.parse::<T>().map_err(|e| e.to_string())?;
    serde_json::to_value(parsed).map_err(|e| e.to_string())
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CustomType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A closed enumeration and the external names of its variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    variants: Vec<String>,
}

impl EnumType {
    /// Creates an enumeration description.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// Enumeration type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// External variant names in declaration order.
    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }
}
