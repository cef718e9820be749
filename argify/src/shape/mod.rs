//! Classification of declared types into the closed set of CLI shapes.

use std::sync::Arc;

use serde_json::Value;

use crate::schema::{DeclaredType, EnumType, ScalarType, SchemaType};


/// How a field is exposed on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// One value coerced with the given scalar type.
    Scalar(ScalarType),
    /// Several values of one element type.
    Sequence {
        /// Coercion applied to each token.
        element: ScalarType,
        /// Whether the declared collection is a set.
        unique: bool,
    },
    /// `key=value` tokens assembled into a mapping.
    Mapping {
        /// Coercion applied to each value.
        value: ScalarType,
    },
    /// Exactly `arity` values, all coerced like the first position.
    Tuple {
        /// Coercion applied to every position.
        element: ScalarType,
        /// Number of values.
        arity: usize,
    },
    /// One of the enumeration's variant names.
    Enum(EnumType),
    /// One of a fixed set of literal values.
    Literal(Vec<Value>),
    /// An enable/disable switch.
    Boolean,
    /// A nested schema expanded into dotted options.
    Record {
        /// The nested schema.
        schema: Arc<SchemaType>,
        /// Whether the whole subtree may be absent.
        optional: bool,
    },
}

impl Shape {
    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Sequence { .. } => "sequence",
            Self::Mapping { .. } => "mapping",
            Self::Tuple { .. } => "tuple",
            Self::Enum(_) => "enum",
            Self::Literal(_) => "literal",
            Self::Boolean => "boolean",
            Self::Record { .. } => "record",
        }
    }
}

/// Maps a declared type onto its [`Shape`].
///
/// Optional wrappers and unions are flattened first. A single remaining
/// alternative keeps its own shape (an optional record becomes a record
/// with `optional` set), except that an optional boolean takes an explicit
/// `true`/`false` value so all three states stay reachable. Two or more
/// alternatives fall back to a plain string.
///
/// # Examples
///
/// ```
/// use argify::{DeclaredType, ScalarType, Shape, classify};
///
/// let ports = DeclaredType::set(DeclaredType::Scalar(ScalarType::UInt));
/// assert_eq!(
///     classify(&ports),
///     Shape::Sequence { element: ScalarType::UInt, unique: true },
/// );
/// assert_eq!(classify(&DeclaredType::Scalar(ScalarType::Bool)), Shape::Boolean);
/// ```
#[must_use]
pub fn classify(declared: &DeclaredType) -> Shape {
    match declared {
        DeclaredType::Any | DeclaredType::Null => Shape::Scalar(ScalarType::Str),
        DeclaredType::Record(schema) => Shape::Record {
            schema: Arc::clone(schema),
            optional: false,
        },
        DeclaredType::Sequence(inner) => Shape::Sequence {
            element: scalar_of(inner),
            unique: false,
        },
        DeclaredType::Set(inner) => Shape::Sequence {
            element: scalar_of(inner),
            unique: true,
        },
        DeclaredType::Mapping { value, .. } => Shape::Mapping {
            value: scalar_of(value),
        },
        DeclaredType::Tuple(items) => items.first().map_or(
            Shape::Scalar(ScalarType::Str),
            |first| Shape::Tuple {
                element: scalar_of(first),
                arity: items.len(),
            },
        ),
        DeclaredType::Enum(enumeration) => Shape::Enum(enumeration.clone()),
        DeclaredType::Literal(values) => Shape::Literal(values.clone()),
        DeclaredType::Union(_) | DeclaredType::Optional(_) => classify_alternatives(declared),
        DeclaredType::Scalar(ScalarType::Bool) => Shape::Boolean,
        DeclaredType::Scalar(scalar) => Shape::Scalar(scalar.clone()),
    }
}

fn classify_alternatives(declared: &DeclaredType) -> Shape {
    let mut alternatives = Vec::new();
    flatten(declared, &mut alternatives);
    match alternatives.as_slice() {
        [DeclaredType::Record(schema)] => Shape::Record {
            schema: Arc::clone(schema),
            optional: true,
        },
        [DeclaredType::Scalar(ScalarType::Bool)] => Shape::Scalar(ScalarType::Bool),
        [single] => classify(single),
        _ => Shape::Scalar(ScalarType::Str),
    }
}

/// Collects the distinct non-null alternatives of nested unions and
/// optional wrappers.
fn flatten<'a>(declared: &'a DeclaredType, out: &mut Vec<&'a DeclaredType>) {
    match declared {
        DeclaredType::Union(items) => items.iter().for_each(|item| flatten(item, out)),
        DeclaredType::Optional(inner) => flatten(inner, out),
        DeclaredType::Null => {}
        other => {
            if !out.contains(&other) {
                out.push(other);
            }
        }
    }
}

/// Coercion type for collection elements.
///
/// Anything that is not a plain scalar (or an optional plain scalar) is
/// passed through as text and left to deserialization.
#[must_use]
pub fn scalar_of(declared: &DeclaredType) -> ScalarType {
    match declared {
        DeclaredType::Scalar(scalar) => scalar.clone(),
        DeclaredType::Union(_) | DeclaredType::Optional(_) => {
            let mut alternatives = Vec::new();
            flatten(declared, &mut alternatives);
            match alternatives.as_slice() {
                [single] => scalar_of(single),
                _ => ScalarType::Str,
            }
        }
        _ => ScalarType::Str,
    }
}
