//! Option descriptors: the parser-independent description of one flag.

use std::fmt;

use serde_json::{Map, Value};

use crate::schema::ScalarType;

#[cfg(test)]
mod tests;

/// Path of keys under which a parsed value is stored.
///
/// A single segment stores a top-level key; several segments assemble the
/// value into nested objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dest(Vec<String>);

impl Dest {
    /// The empty path, naming the namespace root.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended by `segment`.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Key segments from the root.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether the path names the namespace root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads the value stored at this path.
    #[must_use]
    pub fn lookup<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.0
            .iter()
            .try_fold(root, |current, key| current.as_object()?.get(key))
    }

    /// Writes `value` at this path, creating intermediate objects.
    ///
    /// Intermediate non-object values are replaced. Writing the root path
    /// replaces `root` entirely.
    pub fn assign(&self, root: &mut Value, value: Value) {
        let mut current = root;
        for key in &self.0 {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            let Value::Object(map) = current else {
                return;
            };
            current = map.entry(key.clone()).or_insert(Value::Null);
        }
        *current = value;
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for Dest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Number of values an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A switch taking no value.
    None,
    /// Exactly one value.
    One,
    /// At least one value.
    OneOrMore,
    /// Any number of values, including none.
    ZeroOrMore,
    /// Exactly `n` values.
    Exactly(usize),
}

impl Arity {
    /// Whether the option accepts more than one value.
    #[must_use]
    pub const fn is_multiple(self) -> bool {
        matches!(self, Self::OneOrMore | Self::ZeroOrMore | Self::Exactly(_))
    }
}

/// What happens when an option is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionAction {
    /// Store the coerced value(s).
    Store,
    /// Store `true`.
    StoreTrue,
    /// Store `false`.
    StoreFalse,
    /// Split `key=value` tokens and store them as a mapping.
    StoreKeyValue,
}

/// Everything needed to register one option with a parser.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDescriptor {
    /// Flag spellings, canonical long form first.
    pub flags: Vec<String>,
    /// Where the parsed value is stored.
    pub dest: Dest,
    /// Token coercion; `None` for switches and choice-matched values.
    pub value: Option<ScalarType>,
    /// Number of values consumed.
    pub arity: Arity,
    /// Value used when the option is absent.
    pub default: Option<Value>,
    /// Whether the option must be supplied.
    pub required: bool,
    /// Help text.
    pub help: Option<String>,
    /// Allowed values.
    pub choices: Option<Vec<Value>>,
    /// Store behaviour.
    pub action: OptionAction,
    /// Label of the argument group the option belongs to.
    pub group: Option<String>,
}

impl OptionDescriptor {
    /// Creates a single-valued, optional string option.
    #[must_use]
    pub fn new(flags: Vec<String>, dest: Dest) -> Self {
        Self {
            flags,
            dest,
            value: Some(ScalarType::Str),
            arity: Arity::One,
            default: None,
            required: false,
            help: None,
            choices: None,
            action: OptionAction::Store,
            group: None,
        }
    }

    /// The canonical flag, used in messages.
    #[must_use]
    pub fn canonical(&self) -> &str {
        self.flags.first().map_or("", String::as_str)
    }
}
