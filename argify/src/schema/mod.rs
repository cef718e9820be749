//! Schema model consumed by the parser builder.
//!
//! A [`SchemaType`] is a named record with ordered [`FieldDescriptor`]s and
//! zero or more base schemas. Bases model inheritance: their fields come
//! first, and a field redeclared further down the chain replaces the
//! ancestor's descriptor without moving it.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ArgifyError, ArgifyResult};

mod declared;
mod describe;

pub use declared::{CoerceFn, CustomType, DeclaredType, EnumType, ScalarType};
pub use describe::Describe;

/// Extension key holding explicit flag names.
pub const EXT_CLI: &str = "cli";
/// Extension key overriding the enable prefix of a boolean field.
pub const EXT_ENABLE_PREFIX: &str = "cli_enable_prefix";
/// Extension key overriding the disable prefix of a boolean field.
pub const EXT_DISABLE_PREFIX: &str = "cli_disable_prefix";

/// Types that expose a schema and can be rebuilt from parsed values.
///
/// Usually derived with `#[derive(argify::Schema, serde::Deserialize)]`.
pub trait Schema: DeserializeOwned {
    /// Returns a freshly built description of this type.
    fn schema() -> SchemaType;
}

/// Schema-level CLI settings shared by every field of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Prefix for flags that switch a boolean on, for example `--on-`.
    pub cli_enable_prefix: Option<String>,
    /// Prefix for flags that switch a boolean off, for example `--off-`.
    pub cli_disable_prefix: Option<String>,
}

impl SchemaConfig {
    /// Fills unset values from `fallback`.
    #[must_use]
    pub fn or(self, fallback: &Self) -> Self {
        Self {
            cli_enable_prefix: self
                .cli_enable_prefix
                .or_else(|| fallback.cli_enable_prefix.clone()),
            cli_disable_prefix: self
                .cli_disable_prefix
                .or_else(|| fallback.cli_disable_prefix.clone()),
        }
    }
}

/// A named record definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaType {
    name: String,
    bases: Vec<SchemaType>,
    fields: Vec<FieldDescriptor>,
    config: SchemaConfig,
}

impl SchemaType {
    /// Creates an empty schema called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            fields: Vec::new(),
            config: SchemaConfig::default(),
        }
    }

    /// Adds a base schema whose fields precede this type's own fields.
    #[must_use]
    pub fn with_base(mut self, base: Self) -> Self {
        self.bases.push(base);
        self
    }

    /// Appends a field declared by this type.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Replaces the schema-level configuration.
    #[must_use]
    pub fn with_config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    /// Type name, used as the grouping label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct bases in declaration order.
    #[must_use]
    pub fn bases(&self) -> &[Self] {
        &self.bases
    }

    /// Fields declared by this type itself.
    #[must_use]
    pub fn own_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Configuration declared by this type itself.
    #[must_use]
    pub const fn own_config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Ancestors followed by this type, root-most first.
    ///
    /// Bases are visited depth first; a type already seen (by name) is not
    /// repeated, so diamond-shaped hierarchies list the shared root once.
    #[must_use]
    pub fn lineage(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_lineage(&mut out);
        out
    }

    fn collect_lineage<'a>(&'a self, out: &mut Vec<&'a Self>) {
        for base in &self.bases {
            base.collect_lineage(out);
        }
        if !out.iter().any(|seen| seen.name == self.name) {
            out.push(self);
        }
    }

    /// Effective fields in declaration order.
    ///
    /// Each name appears once, at the position where it was first declared,
    /// holding the most specific declaration.
    #[must_use]
    pub fn fields(&self) -> Vec<&FieldDescriptor> {
        let mut out: Vec<&FieldDescriptor> = Vec::new();
        for ty in self.lineage() {
            for field in &ty.fields {
                match out.iter_mut().find(|known| known.name == field.name) {
                    Some(slot) => *slot = field,
                    None => out.push(field),
                }
            }
        }
        out
    }

    /// Looks up an effective field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().into_iter().find(|f| f.name == name)
    }

    /// Configuration of this type with unset values inherited from the
    /// nearest base that sets them.
    #[must_use]
    pub fn config(&self) -> SchemaConfig {
        self.lineage()
            .into_iter()
            .rev()
            .fold(SchemaConfig::default(), |acc, ty| acc.or(&ty.config))
    }
}

/// Metadata for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    declared_type: DeclaredType,
    default: Option<Value>,
    alias: Option<String>,
    description: Option<String>,
    title: Option<String>,
    extra: BTreeMap<String, Value>,
}

impl FieldDescriptor {
    /// Creates a required field.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            default: None,
            alias: None,
            description: None,
            title: None,
            extra: BTreeMap::new(),
        }
    }

    /// Creates a field typed by a [`Describe`] implementation.
    #[must_use]
    pub fn of<T: Describe + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::declared_type())
    }

    /// Sets the default value, making the field optional.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the external alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the description used as help text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the title, used as help text when no description exists.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds an extension entry such as `cli` or `cli_enable_prefix`.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Field name as declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub const fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    /// Default value, if any.
    #[must_use]
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// External alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Extension entries.
    #[must_use]
    pub const fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// A field is required exactly when it has no default.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Key under which the parsed value is stored: the alias when present.
    #[must_use]
    pub fn key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Explicit flag names from the `cli` extension.
    ///
    /// A single string is accepted as a one-element list.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::InvalidExtension`] when the entry is neither a
    /// string nor an array of strings.
    pub fn cli_names(&self) -> ArgifyResult<Option<Vec<String>>> {
        let Some(value) = self.extra.get(EXT_CLI) else {
            return Ok(None);
        };
        let invalid = || ArgifyError::invalid_extension(&self.name, EXT_CLI, "an array of strings");
        match value {
            Value::String(single) => Ok(Some(vec![single.clone()])),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned).ok_or_else(invalid))
                .collect::<ArgifyResult<Vec<_>>>()
                .map(Some),
            _ => Err(invalid()),
        }
    }

    /// Reads a string-valued extension entry.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::InvalidExtension`] when the entry exists but is
    /// not a string.
    pub fn extension_str(&self, key: &str) -> ArgifyResult<Option<&str>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text)),
            Some(_) => Err(ArgifyError::invalid_extension(&self.name, key, "a string")),
        }
    }
}
