//! A clap-backed parser that accepts [`OptionDescriptor`]s.
//!
//! [`ArgParser`] exposes the narrow registration interface the tree walker
//! needs (argument groups, mutually exclusive groups, single options) and
//! turns clap's matches back into a [`Namespace`]. Coercion happens inside
//! clap through a typed value parser, so invalid tokens, unknown choices
//! and missing required options are reported as ordinary usage errors.

use std::collections::BTreeSet;
use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use serde_json::{Map, Value};
use tracing::debug;

use crate::option::{Arity, Dest, OptionAction, OptionDescriptor};
use crate::{ArgifyError, ArgifyResult};

mod namespace;
mod value;

pub use namespace::Namespace;
use value::TokenParser;

/// Handle to a titled argument group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHandle {
    label: String,
}

impl GroupHandle {
    /// Group title shown as a help heading.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Handle to a mutually exclusive group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusiveGroup {
    id: String,
    heading: Option<String>,
}

/// Where an option is registered.
#[derive(Debug, Clone, Copy)]
pub enum Placement<'a> {
    /// Directly on the parser.
    Root,
    /// Under an argument group's heading.
    Group(&'a GroupHandle),
    /// Inside a mutually exclusive group.
    Exclusive(&'a ExclusiveGroup),
}

#[derive(Debug, Clone)]
struct Registered {
    id: String,
    option: OptionDescriptor,
}

/// Command-line parser assembled from option descriptors.
#[derive(Debug, Clone)]
pub struct ArgParser {
    command: Command,
    registered: Vec<Registered>,
    group_labels: Vec<String>,
    exclusive_groups: usize,
    claimed: BTreeSet<String>,
    optional_records: Vec<Dest>,
}

impl ArgParser {
    /// Creates an empty parser for a program called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_command(Command::new(name.into()))
    }

    /// Wraps an existing command, keeping its arguments and settings.
    ///
    /// Tokens already used by the command, including the built-in help and
    /// version flags, count as claimed.
    #[must_use]
    pub fn from_command(command: Command) -> Self {
        let mut claimed: BTreeSet<String> = ["--help", "-h"].map(str::to_owned).into();
        if command.get_version().is_some() || command.get_long_version().is_some() {
            claimed.extend(["--version", "-V"].map(str::to_owned));
        }
        for arg in command.get_arguments() {
            let longs = arg.get_long_and_visible_aliases().into_iter().flatten();
            claimed.extend(longs.map(|long| format!("--{long}")));
            let shorts = arg.get_short_and_visible_aliases().into_iter().flatten();
            claimed.extend(shorts.map(|short| format!("-{short}")));
        }
        Self {
            command: command.args_override_self(true),
            registered: Vec::new(),
            group_labels: Vec::new(),
            exclusive_groups: 0,
            claimed,
            optional_records: Vec::new(),
        }
    }

    /// Creates (or reuses) a titled argument group.
    pub fn add_argument_group(&mut self, label: impl Into<String>) -> GroupHandle {
        let handle = GroupHandle {
            label: label.into(),
        };
        if !self.group_labels.contains(&handle.label) {
            self.group_labels.push(handle.label.clone());
        }
        handle
    }

    /// Creates a mutually exclusive group, optionally shown under `parent`.
    pub fn add_mutually_exclusive_group(
        &mut self,
        parent: Option<&GroupHandle>,
        required: bool,
    ) -> ExclusiveGroup {
        self.exclusive_groups += 1;
        let id = format!("__exclusive_{}", self.exclusive_groups);
        let group = ArgGroup::new(id.clone()).required(required).multiple(false);
        self.command = std::mem::take(&mut self.command).group(group);
        ExclusiveGroup {
            id,
            heading: parent.map(|p| p.label.clone()),
        }
    }

    /// Registers one option.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::InvalidFlag`] when a flag cannot be expressed
    /// as a clap long or short name, and [`ArgifyError::FlagCollision`] when
    /// a flag is already taken.
    pub fn add_option(
        &mut self,
        placement: Placement<'_>,
        option: OptionDescriptor,
    ) -> ArgifyResult<()> {
        let field = option.dest.to_string();
        let names = parse_flags(&option.flags, &field)?;
        let mut seen = BTreeSet::new();
        for flag in &option.flags {
            if self.claimed.contains(flag) || !seen.insert(flag.as_str()) {
                return Err(ArgifyError::flag_collision(flag, &field));
            }
        }

        let id = self.unique_id(&field);
        let mut arg = Arg::new(id.clone()).required(option.required);
        arg = apply_names(arg, &names);
        if let Some(help) = &option.help {
            arg = arg.help(help.clone());
        }
        let heading = match placement {
            Placement::Root => None,
            Placement::Group(group) => Some(group.label.clone()),
            Placement::Exclusive(group) => {
                arg = arg.group(group.id.clone());
                group.heading.clone()
            }
        };
        if let Some(heading) = heading {
            arg = arg.help_heading(heading);
        }
        arg = apply_action(arg, &option);

        debug!(
            dest = %option.dest,
            flags = ?option.flags,
            group = option.group.as_deref(),
            "registered option"
        );
        self.claimed.extend(option.flags.iter().cloned());
        self.command = std::mem::take(&mut self.command).arg(arg);
        self.registered.push(Registered { id, option });
        Ok(())
    }

    /// Marks `dest` as an optional record: when none of its options is
    /// supplied, the whole subtree parses as `null`.
    pub fn add_optional_record(&mut self, dest: Dest) {
        if !self.optional_records.contains(&dest) {
            self.optional_records.push(dest);
        }
    }

    /// Registered descriptors in registration order.
    pub fn options(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.registered.iter().map(|r| &r.option)
    }

    /// Argument group labels in creation order.
    #[must_use]
    pub fn group_labels(&self) -> &[String] {
        &self.group_labels
    }

    /// Whether `token` is already used by a flag of this parser.
    #[must_use]
    pub fn is_claimed(&self, token: &str) -> bool {
        self.claimed.contains(token)
    }

    /// Every claimed token.
    pub fn claimed_tokens(&self) -> impl Iterator<Item = &str> {
        self.claimed.iter().map(String::as_str)
    }

    /// The underlying clap command.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// Consumes the parser, returning the clap command.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command
    }

    /// Parses `argv`; the first item is the program name.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::CliParsing`] for any usage error, including
    /// help and version requests (see
    /// [`is_display_request`](crate::is_display_request)).
    pub fn try_parse_from<I, T>(&self, argv: I) -> ArgifyResult<Namespace>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().try_get_matches_from(argv)?;
        Ok(self.namespace_from(&matches))
    }

    /// Parses `argv`, printing usage and exiting the process on error.
    pub fn parse_from<I, T>(&self, argv: I) -> Namespace
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().get_matches_from(argv);
        self.namespace_from(&matches)
    }

    /// Builds a namespace from matches produced by this parser's command.
    ///
    /// Every destination starts at its default (or `null`); options given
    /// on the command line then overwrite it.
    #[must_use]
    pub fn namespace_from(&self, matches: &ArgMatches) -> Namespace {
        let mut root = Value::Object(Map::new());
        for reg in &self.registered {
            if reg.option.dest.lookup(&root).is_none() {
                let default = reg.option.default.clone().unwrap_or(Value::Null);
                reg.option.dest.assign(&mut root, default);
            }
        }

        let mut supplied: Vec<&Dest> = Vec::new();
        for reg in &self.registered {
            if matches.value_source(&reg.id) != Some(ValueSource::CommandLine) {
                continue;
            }
            let current = reg.option.dest.lookup(&root);
            let value = supplied_value(matches, reg, current);
            reg.option.dest.assign(&mut root, value);
            supplied.push(&reg.option.dest);
        }

        let mut records: Vec<&Dest> = self.optional_records.iter().collect();
        records.sort_by_key(|dest| std::cmp::Reverse(dest.segments().len()));
        for record in records {
            let touched = supplied
                .iter()
                .any(|dest| dest.segments().starts_with(record.segments()));
            if !touched {
                record.assign(&mut root, Value::Null);
            }
        }

        match root {
            Value::Object(values) => Namespace::from_map(values),
            _ => Namespace::default(),
        }
    }

    fn unique_id(&self, base: &str) -> String {
        let taken = |id: &str| self.registered.iter().any(|r| r.id == id);
        if !taken(base) {
            return base.to_owned();
        }
        (2..)
            .map(|n| format!("{base}#{n}"))
            .find(|id| !taken(id))
            .unwrap_or_else(|| base.to_owned())
    }
}

fn supplied_value(matches: &ArgMatches, reg: &Registered, current: Option<&Value>) -> Value {
    let values = || -> Vec<Value> {
        matches
            .try_get_many::<Value>(&reg.id)
            .ok()
            .flatten()
            .map(|many| many.cloned().collect())
            .unwrap_or_default()
    };
    match reg.option.action {
        OptionAction::StoreTrue => Value::Bool(true),
        OptionAction::StoreFalse => Value::Bool(false),
        OptionAction::StoreKeyValue => {
            let mut merged = current
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            for entry in values() {
                if let Value::Object(pairs) = entry {
                    merged.extend(pairs);
                }
            }
            Value::Object(merged)
        }
        OptionAction::Store if reg.option.arity.is_multiple() => Value::Array(values()),
        OptionAction::Store => matches
            .try_get_one::<Value>(&reg.id)
            .ok()
            .flatten()
            .cloned()
            .unwrap_or(Value::Null),
    }
}

/// Parsed form of one flag.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FlagName {
    Long(String),
    Short(char),
}

fn parse_flags(flags: &[String], field: &str) -> ArgifyResult<Vec<FlagName>> {
    if flags.is_empty() {
        return Err(ArgifyError::invalid_flag("", field, "no flag names were given"));
    }
    flags.iter().map(|flag| parse_flag(flag, field)).collect()
}

fn parse_flag(flag: &str, field: &str) -> ArgifyResult<FlagName> {
    let invalid = |reason| ArgifyError::invalid_flag(flag, field, reason);
    if let Some(long) = flag.strip_prefix("--") {
        if long.is_empty() || long.starts_with('-') {
            return Err(invalid("long flags need a name after '--'"));
        }
        if long.contains('=') || long.chars().any(char::is_whitespace) {
            return Err(invalid("long flags cannot contain '=' or whitespace"));
        }
        return Ok(FlagName::Long(long.to_owned()));
    }
    let Some(short) = flag.strip_prefix('-') else {
        return Err(invalid("flags must start with '-' or '--'"));
    };
    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' && !c.is_whitespace() => Ok(FlagName::Short(c)),
        _ => Err(invalid("short flags take exactly one character")),
    }
}

fn apply_names(mut arg: Arg, names: &[FlagName]) -> Arg {
    let mut has_long = false;
    let mut has_short = false;
    for name in names {
        match name {
            FlagName::Long(long) if !has_long => {
                arg = arg.long(long.clone());
                has_long = true;
            }
            FlagName::Long(long) => arg = arg.visible_alias(long.clone()),
            FlagName::Short(short) if !has_short => {
                arg = arg.short(*short);
                has_short = true;
            }
            FlagName::Short(short) => arg = arg.visible_short_alias(*short),
        }
    }
    arg
}

fn apply_action(arg: Arg, option: &OptionDescriptor) -> Arg {
    match option.action {
        OptionAction::StoreTrue => return arg.action(ArgAction::SetTrue),
        OptionAction::StoreFalse => return arg.action(ArgAction::SetFalse),
        OptionAction::Store | OptionAction::StoreKeyValue => {}
    }
    let action = if option.action == OptionAction::StoreKeyValue {
        ArgAction::Append
    } else {
        ArgAction::Set
    };
    let valued = arg
        .action(action)
        .value_parser(TokenParser::for_option(option))
        .value_name(option.dest.to_string().to_uppercase());
    match option.arity {
        Arity::None | Arity::One => valued.num_args(1),
        Arity::OneOrMore => valued.num_args(1..),
        Arity::ZeroOrMore => valued.num_args(0..),
        Arity::Exactly(n) => valued.num_args(n),
    }
}
