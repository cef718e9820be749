//! Option synthesis: one field plus its shape becomes option descriptors.
//!
//! Naming policy lives in [`naming`]; the enable/disable pairing of boolean
//! fields lives in [`boolean`]. Everything here is a pure function of the
//! field, its shape and the [`SynthContext`], so building the same schema
//! twice yields identical descriptors.

use std::collections::BTreeSet;

use crate::option::{Arity, Dest, OptionAction, OptionDescriptor};
use crate::schema::{FieldDescriptor, ScalarType, SchemaConfig};
use crate::shape::Shape;
use crate::ArgifyResult;

mod boolean;
mod naming;
#[cfg(test)]
mod tests;

pub use naming::{derive_flag, render_name};

/// Inputs shared by every field of one schema level.
#[derive(Debug, Clone, Copy)]
pub struct SynthContext<'a> {
    /// Destination of the enclosing record.
    pub parent: &'a Dest,
    /// Flag prefix accumulated from enclosing records, such as `child.`.
    pub flag_prefix: &'a str,
    /// Replaces underscores in derived flag names.
    pub separator: &'a str,
    /// Resolved configuration of the schema declaring the field.
    pub config: &'a SchemaConfig,
    /// Argument group label.
    pub group: Option<&'a str>,
    /// Set inside optional records: no option is individually required.
    pub optional_subtree: bool,
    /// Whether to derive one-letter short flags.
    pub auto_truncate: bool,
    /// Tokens already taken in this build.
    pub claimed: &'a BTreeSet<String>,
}

/// Result of synthesizing one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Synthesized {
    /// Options registered on their own.
    Options(Vec<OptionDescriptor>),
    /// Options registered together in one mutually exclusive group.
    Exclusive {
        /// Whether one of the options must be supplied.
        required: bool,
        /// The competing options.
        options: Vec<OptionDescriptor>,
    },
}

impl Synthesized {
    /// The synthesized descriptors, regardless of grouping.
    #[must_use]
    pub fn options(&self) -> &[OptionDescriptor] {
        match self {
            Self::Options(options) | Self::Exclusive { options, .. } => options,
        }
    }
}

/// Produces the option descriptors for one field.
///
/// # Errors
///
/// Returns [`ArgifyError::InvalidExtension`](crate::ArgifyError::InvalidExtension)
/// when a `cli`, `cli_enable_prefix` or `cli_disable_prefix` extension is
/// malformed.
pub fn synthesize(
    field: &FieldDescriptor,
    shape: &Shape,
    ctx: &SynthContext<'_>,
) -> ArgifyResult<Synthesized> {
    let mut option = OptionDescriptor {
        flags: Vec::new(),
        dest: ctx.parent.child(field.key()),
        value: None,
        arity: Arity::One,
        default: field.default().cloned(),
        required: field.is_required() && !ctx.optional_subtree,
        help: field
            .description()
            .or_else(|| field.title())
            .map(str::to_owned),
        choices: None,
        action: OptionAction::Store,
        group: ctx.group.map(str::to_owned),
    };

    let many = if field.is_required() {
        Arity::OneOrMore
    } else {
        Arity::ZeroOrMore
    };
    match shape {
        Shape::Boolean => return boolean::synthesize(field, option, ctx),
        Shape::Scalar(scalar) => option.value = Some(scalar.clone()),
        Shape::Sequence { element, .. } => {
            option.value = Some(element.clone());
            option.arity = many;
        }
        Shape::Mapping { value } => {
            option.value = Some(value.clone());
            option.arity = many;
            option.action = OptionAction::StoreKeyValue;
        }
        Shape::Tuple { element, arity } => {
            option.value = Some(element.clone());
            option.arity = Arity::Exactly(*arity);
        }
        Shape::Enum(enumeration) => {
            option.choices = Some(
                enumeration
                    .variants()
                    .iter()
                    .map(|v| v.as_str().into())
                    .collect(),
            );
        }
        Shape::Literal(values) => option.choices = Some(values.clone()),
        Shape::Record { .. } => option.value = Some(ScalarType::Json),
    }

    let mut flags = naming::long_flags(field, ctx)?;
    if ctx.auto_truncate
        && let Some(short) = naming::short_flag(field.name(), ctx.claimed)
        && !flags.contains(&short)
    {
        flags.push(short);
    }
    option.flags = flags;
    Ok(Synthesized::Options(vec![option]))
}
