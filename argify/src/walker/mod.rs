//! Recursive registration of a schema's options on an [`ArgParser`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use tracing::{debug, trace};

use crate::fields::enumerate_fields;
use crate::option::{Dest, OptionDescriptor};
use crate::parser::{ArgParser, GroupHandle, Placement};
use crate::schema::{Schema, SchemaType};
use crate::shape::{Shape, classify};
use crate::synth::{SynthContext, Synthesized, render_name, synthesize};
use crate::ArgifyResult;

#[cfg(test)]
mod tests;

/// Knobs for [`build_parser`].
///
/// Every call starts from its own value; nothing is shared between builds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Field names or dotted destinations to leave out entirely.
    pub excludes: BTreeSet<String>,
    /// Derive one-letter short flags from field names.
    pub auto_truncate: bool,
    /// Group options under the type that first declared them.
    pub groupby_inherit: bool,
    /// Short tokens never handed out as abbreviations.
    pub exclude_truncated_tokens: BTreeSet<String>,
    /// Expand nested records into dotted options instead of taking JSON.
    pub parse_nested_model: bool,
    /// Replaces underscores in derived flag names.
    pub naming_separator: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            excludes: BTreeSet::new(),
            auto_truncate: true,
            groupby_inherit: true,
            exclude_truncated_tokens: BTreeSet::from(["-h".to_owned()]),
            parse_nested_model: true,
            naming_separator: "-".to_owned(),
        }
    }
}

impl BuildOptions {
    /// Leaves out a field name or dotted destination.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excludes.insert(name.into());
        self
    }

    /// Enables or disables short flag derivation.
    #[must_use]
    pub const fn with_auto_truncate(mut self, enabled: bool) -> Self {
        self.auto_truncate = enabled;
        self
    }

    /// Enables or disables grouping by declaring type.
    #[must_use]
    pub const fn with_groupby_inherit(mut self, enabled: bool) -> Self {
        self.groupby_inherit = enabled;
        self
    }

    /// Reserves a short token so it is never derived.
    #[must_use]
    pub fn reserve_short(mut self, token: impl Into<String>) -> Self {
        self.exclude_truncated_tokens.insert(token.into());
        self
    }

    /// Enables or disables expansion of nested records.
    #[must_use]
    pub const fn with_parse_nested_model(mut self, enabled: bool) -> Self {
        self.parse_nested_model = enabled;
        self
    }

    /// Sets the naming separator.
    #[must_use]
    pub fn with_naming_separator(mut self, separator: impl Into<String>) -> Self {
        self.naming_separator = separator.into();
        self
    }
}

/// Registers every option derived from `schema` on `parser`.
///
/// `None` returns the parser unchanged.
///
/// # Errors
///
/// Fails with [`ArgifyError::FlagCollision`](crate::ArgifyError::FlagCollision),
/// [`ArgifyError::InvalidFlag`](crate::ArgifyError::InvalidFlag) or
/// [`ArgifyError::InvalidExtension`](crate::ArgifyError::InvalidExtension);
/// no partially built parser is returned.
///
/// # Examples
///
/// ```
/// use argify::{ArgParser, BuildOptions, FieldDescriptor, SchemaType, build_parser};
///
/// let schema = SchemaType::new("Config")
///     .with_field(FieldDescriptor::of::<String>("name"))
///     .with_field(FieldDescriptor::of::<bool>("flag"));
/// let parser = build_parser(ArgParser::new("demo"), Some(&schema), &BuildOptions::default())?;
///
/// let flags: Vec<_> = parser.options().flat_map(|o| o.flags.clone()).collect();
/// assert_eq!(flags, ["--name", "-n", "--enable-flag", "--disable-flag"]);
/// # Ok::<(), argify::ArgifyError>(())
/// ```
pub fn build_parser(
    mut parser: ArgParser,
    schema: Option<&SchemaType>,
    options: &BuildOptions,
) -> ArgifyResult<ArgParser> {
    let Some(schema) = schema else {
        return Ok(parser);
    };
    let mut claimed = options.exclude_truncated_tokens.clone();
    claimed.extend(parser.claimed_tokens().map(str::to_owned));

    let mut walker = Walker {
        parser: &mut parser,
        options,
        claimed,
        groups: BTreeMap::new(),
    };
    let top = Level {
        dest: Dest::root(),
        flag_prefix: String::new(),
        groupby: options.groupby_inherit,
        optional: false,
    };
    walker.walk(schema, &top)?;
    debug!(
        schema = schema.name(),
        options = parser.options().count(),
        "parser built"
    );
    Ok(parser)
}

impl ArgParser {
    /// Builds a parser named `name` for the schema of `T`.
    ///
    /// # Errors
    ///
    /// See [`build_parser`].
    pub fn for_schema<T: Schema>(
        name: impl Into<String>,
        options: &BuildOptions,
    ) -> ArgifyResult<Self> {
        build_parser(Self::new(name), Some(&T::schema()), options)
    }
}

/// Position of one schema level inside the tree.
struct Level {
    dest: Dest,
    flag_prefix: String,
    groupby: bool,
    optional: bool,
}

struct Walker<'a> {
    parser: &'a mut ArgParser,
    options: &'a BuildOptions,
    claimed: BTreeSet<String>,
    groups: BTreeMap<String, GroupHandle>,
}

impl Walker<'_> {
    fn walk(&mut self, schema: &SchemaType, level: &Level) -> ArgifyResult<()> {
        let config = schema.config();
        for entry in enumerate_fields(schema, level.groupby) {
            let field = entry.field;
            let dest = level.dest.child(field.key());
            if self.is_excluded(field.name(), &dest) {
                trace!(field = %dest, "excluded");
                continue;
            }

            let shape = classify(field.declared_type());
            trace!(field = %dest, shape = shape.kind(), "classified");
            if let Shape::Record { schema: nested, optional } = &shape
                && self.options.parse_nested_model
            {
                let child = Level {
                    flag_prefix: format!(
                        "{}{}.",
                        level.flag_prefix,
                        render_name(field.name(), &self.options.naming_separator)
                    ),
                    dest,
                    groupby: true,
                    optional: level.optional || *optional,
                };
                if *optional {
                    self.parser.add_optional_record(child.dest.clone());
                }
                debug!(
                    field = %child.dest,
                    schema = nested.name(),
                    optional = *optional,
                    "descending into nested record"
                );
                self.walk(nested, &child)?;
                continue;
            }

            let ctx = SynthContext {
                parent: &level.dest,
                flag_prefix: &level.flag_prefix,
                separator: &self.options.naming_separator,
                config: &config,
                group: entry.group,
                optional_subtree: level.optional,
                auto_truncate: self.options.auto_truncate,
                claimed: &self.claimed,
            };
            let synthesized = synthesize(field, &shape, &ctx)?;
            self.register(synthesized, entry.group)?;
        }
        Ok(())
    }

    fn is_excluded(&self, name: &str, dest: &Dest) -> bool {
        self.options.excludes.contains(name) || self.options.excludes.contains(&dest.to_string())
    }

    fn register(&mut self, synthesized: Synthesized, group: Option<&str>) -> ArgifyResult<()> {
        let handle = group.map(|label| self.group(label));
        match synthesized {
            Synthesized::Options(options) => {
                let placement = handle.as_ref().map_or(Placement::Root, Placement::Group);
                for option in options {
                    self.add(placement, option)?;
                }
            }
            Synthesized::Exclusive { required, options } => {
                let exclusive = self
                    .parser
                    .add_mutually_exclusive_group(handle.as_ref(), required);
                for option in options {
                    self.add(Placement::Exclusive(&exclusive), option)?;
                }
            }
        }
        Ok(())
    }

    fn add(&mut self, placement: Placement<'_>, option: OptionDescriptor) -> ArgifyResult<()> {
        let flags = option.flags.clone();
        self.parser.add_option(placement, option)?;
        self.claimed.extend(flags);
        Ok(())
    }

    fn group(&mut self, label: &str) -> GroupHandle {
        if let Some(handle) = self.groups.get(label) {
            return handle.clone();
        }
        let handle = self.parser.add_argument_group(label);
        self.groups.insert(label.to_owned(), handle.clone());
        handle
    }
}
