//! Field enumeration with inheritance-aware grouping.
//!
//! Every effective field of a schema is listed once, in declaration order,
//! and optionally labelled with the type that first declared it. Labels are
//! used as argument group titles so inherited options stay together in help
//! output.

use std::collections::BTreeMap;

use crate::schema::{FieldDescriptor, SchemaType};


/// A field together with its grouping label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumeratedField<'a> {
    /// The effective descriptor of the field.
    pub field: &'a FieldDescriptor,
    /// Name of the first (most ancestral) type declaring the field, when
    /// grouping is enabled.
    pub group: Option<&'a str>,
}

/// Maps every field name to the first type that declares it.
///
/// Types are visited root-most first, so a field redeclared by a subtype
/// keeps the ancestor's label. When unrelated bases declare the same field,
/// the first one visited wins.
#[must_use]
pub fn group_labels(schema: &SchemaType) -> BTreeMap<&str, &str> {
    let mut labels = BTreeMap::new();
    for ty in schema.lineage() {
        for field in ty.own_fields() {
            labels.entry(field.name()).or_insert_with(|| ty.name());
        }
    }
    labels
}

/// Lists the effective fields of `schema`.
///
/// # Examples
///
/// ```
/// use argify::{FieldDescriptor, SchemaType, enumerate_fields};
///
/// let base = SchemaType::new("Base").with_field(FieldDescriptor::of::<u32>("port"));
/// let app = SchemaType::new("App")
///     .with_base(base)
///     .with_field(FieldDescriptor::of::<String>("host"));
///
/// let fields = enumerate_fields(&app, true);
/// let labels: Vec<_> = fields.iter().map(|f| (f.field.name(), f.group)).collect();
/// assert_eq!(labels, [("port", Some("Base")), ("host", Some("App"))]);
/// ```
#[must_use]
pub fn enumerate_fields(schema: &SchemaType, groupby: bool) -> Vec<EnumeratedField<'_>> {
    let labels = if groupby {
        group_labels(schema)
    } else {
        BTreeMap::new()
    };
    schema
        .fields()
        .into_iter()
        .map(|field| EnumeratedField {
            field,
            group: labels.get(field.name()).copied(),
        })
        .collect()
}
