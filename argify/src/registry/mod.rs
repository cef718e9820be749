//! Command registration and dispatch.
//!
//! A [`CommandRegistry`] holds either one top-level command or any number
//! of named sub-commands. Each command pairs a schema with a handler; at
//! dispatch time the matching parser is built, the arguments are parsed and
//! the reconstructed value is handed to the handler.

use std::ffi::OsString;

use clap::Command;
use tracing::{debug, warn};

use crate::parser::{ArgParser, Namespace};
use crate::schema::{Schema, SchemaType};
use crate::walker::{BuildOptions, build_parser};
use crate::{ArgifyError, ArgifyResult, HandlerError};


type Handler = Box<dyn Fn(Namespace) -> ArgifyResult<()>>;

struct Entry {
    schema: Option<fn() -> SchemaType>,
    handler: Handler,
}

impl Entry {
    fn typed<T, F, E>(handler: F) -> Self
    where
        T: Schema + 'static,
        F: Fn(T) -> Result<(), E> + 'static,
        E: Into<HandlerError>,
    {
        Self {
            schema: Some(T::schema),
            handler: Box::new(move |namespace: Namespace| {
                let value = namespace.into_construct::<T>()?;
                handler(value).map_err(ArgifyError::handler)
            }),
        }
    }

    fn bare<F, E>(handler: F) -> Self
    where
        F: Fn() -> Result<(), E> + 'static,
        E: Into<HandlerError>,
    {
        Self {
            schema: None,
            handler: Box::new(move |_: Namespace| handler().map_err(ArgifyError::handler)),
        }
    }

    fn parser(&self, name: &str, options: &BuildOptions) -> ArgifyResult<ArgParser> {
        let schema = self.schema.map(|describe| describe());
        build_parser(ArgParser::new(name), schema.as_ref(), options)
    }
}

/// Outcome of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// A handler ran; carries the sub-command name, if any.
    Command(Option<String>),
    /// No command was selected and help was printed.
    Help,
}

/// Application-owned registry of commands.
///
/// # Examples
///
/// ```
/// use argify::{BuildOptions, CommandRegistry, Dispatched};
///
/// let mut registry = CommandRegistry::new("tool");
/// registry.sub_command_bare("ping", || Ok::<(), std::io::Error>(()))?;
///
/// let outcome = registry.run_from(["tool", "ping"], &BuildOptions::default())?;
/// assert_eq!(outcome, Dispatched::Command(Some("ping".into())));
/// # Ok::<(), argify::ArgifyError>(())
/// ```
pub struct CommandRegistry {
    name: String,
    root: Option<Entry>,
    subcommands: Vec<(String, Entry)>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("name", &self.name)
            .field("root", &self.root.is_some())
            .field(
                "subcommands",
                &self.subcommands.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl CommandRegistry {
    /// Creates an empty registry for a program called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
            subcommands: Vec::new(),
        }
    }

    /// Registers the single top-level command.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::CommandRegistration`] when any command is
    /// already registered.
    pub fn command<T, F, E>(&mut self, handler: F) -> ArgifyResult<&mut Self>
    where
        T: Schema + 'static,
        F: Fn(T) -> Result<(), E> + 'static,
        E: Into<HandlerError>,
    {
        self.set_root(Entry::typed(handler))
    }

    /// Registers a top-level command that takes no arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::CommandRegistration`] when any command is
    /// already registered.
    pub fn command_bare<F, E>(&mut self, handler: F) -> ArgifyResult<&mut Self>
    where
        F: Fn() -> Result<(), E> + 'static,
        E: Into<HandlerError>,
    {
        self.set_root(Entry::bare(handler))
    }

    /// Registers a named sub-command.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::CommandRegistration`] when the name is taken
    /// or a top-level command exists.
    pub fn sub_command<T, F, E>(
        &mut self,
        name: impl Into<String>,
        handler: F,
    ) -> ArgifyResult<&mut Self>
    where
        T: Schema + 'static,
        F: Fn(T) -> Result<(), E> + 'static,
        E: Into<HandlerError>,
    {
        self.add_sub(name.into(), Entry::typed(handler))
    }

    /// Registers a named sub-command that takes no arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ArgifyError::CommandRegistration`] when the name is taken
    /// or a top-level command exists.
    pub fn sub_command_bare<F, E>(
        &mut self,
        name: impl Into<String>,
        handler: F,
    ) -> ArgifyResult<&mut Self>
    where
        F: Fn() -> Result<(), E> + 'static,
        E: Into<HandlerError>,
    {
        self.add_sub(name.into(), Entry::bare(handler))
    }

    fn set_root(&mut self, entry: Entry) -> ArgifyResult<&mut Self> {
        if self.root.is_some() || !self.subcommands.is_empty() {
            return Err(ArgifyError::registration("only one command is allowed"));
        }
        self.root = Some(entry);
        Ok(self)
    }

    fn add_sub(&mut self, name: String, entry: Entry) -> ArgifyResult<&mut Self> {
        if self.root.is_some() {
            return Err(ArgifyError::registration(format!(
                "cannot add sub-command '{name}' next to a top-level command"
            )));
        }
        if self.subcommands.iter().any(|(known, _)| *known == name) {
            return Err(ArgifyError::registration(format!(
                "command name '{name}' is already used"
            )));
        }
        debug!(command = %name, "registered sub-command");
        self.subcommands.push((name, entry));
        Ok(self)
    }

    /// Names of the registered sub-commands in registration order.
    pub fn sub_command_names(&self) -> impl Iterator<Item = &str> {
        self.subcommands.iter().map(|(name, _)| name.as_str())
    }

    /// Builds the clap command for the whole application.
    ///
    /// # Errors
    ///
    /// Propagates parser construction failures from any command.
    pub fn build_command(&self, options: &BuildOptions) -> ArgifyResult<Command> {
        Ok(self.build(options)?.command)
    }

    fn build(&self, options: &BuildOptions) -> ArgifyResult<Built> {
        if let Some(root) = &self.root {
            let parser = root.parser(&self.name, options)?;
            return Ok(Built {
                command: parser.command().clone(),
                root: Some(parser),
                subs: Vec::new(),
            });
        }
        let mut command = Command::new(self.name.clone());
        let mut subs = Vec::with_capacity(self.subcommands.len());
        for (name, entry) in &self.subcommands {
            let parser = entry.parser(name, options)?;
            command = command.subcommand(parser.command().clone());
            subs.push(parser);
        }
        Ok(Built {
            command,
            root: None,
            subs,
        })
    }

    /// Parses `argv` and runs the selected handler.
    ///
    /// With no command selected (or none registered) the help text is
    /// printed and [`Dispatched::Help`] returned.
    ///
    /// # Errors
    ///
    /// Returns build errors, [`ArgifyError::CliParsing`] for usage errors,
    /// [`ArgifyError::Validation`] when reconstruction fails and
    /// [`ArgifyError::Handler`] when the handler fails.
    pub fn run_from<I, T>(&self, argv: I, options: &BuildOptions) -> ArgifyResult<Dispatched>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut built = self.build(options)?;
        if let (Some(root), Some(entry)) = (&built.root, &self.root) {
            let namespace = root.try_parse_from(argv)?;
            (entry.handler)(namespace)?;
            return Ok(Dispatched::Command(None));
        }

        let matches = built.command.clone().try_get_matches_from(argv)?;
        let selected = matches.subcommand().and_then(|(name, sub_matches)| {
            self.subcommands
                .iter()
                .zip(&built.subs)
                .find(|((known, _), _)| known == name)
                .map(|((known, entry), parser)| (known, entry, parser.namespace_from(sub_matches)))
        });
        let Some((name, entry, namespace)) = selected else {
            warn!(program = %self.name, "no command selected");
            if let Err(err) = built.command.print_help() {
                warn!(error = %err, "failed to print help");
            }
            return Ok(Dispatched::Help);
        };
        debug!(command = %name, "dispatching");
        (entry.handler)(namespace)?;
        Ok(Dispatched::Command(Some(name.clone())))
    }

    /// Parses the process arguments and runs the selected handler.
    ///
    /// Usage errors, help and version requests print their message and
    /// exit the process.
    ///
    /// # Errors
    ///
    /// Returns build, validation and handler errors.
    pub fn run(&self, options: &BuildOptions) -> ArgifyResult<Dispatched> {
        match self.run_from(std::env::args_os(), options) {
            Err(ArgifyError::CliParsing(err)) => err.exit(),
            other => other,
        }
    }
}

struct Built {
    command: Command,
    root: Option<ArgParser>,
    subs: Vec<ArgParser>,
}
