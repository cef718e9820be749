//! Token coercion plugged into clap as a typed value parser.

use std::ffi::OsStr;

use clap::builder::{PossibleValue, TypedValueParser};
use clap::error::ErrorKind;
use clap::{Arg, Command};
use serde_json::{Map, Value};

use crate::ArgifyError;
use crate::option::{OptionAction, OptionDescriptor};
use crate::schema::ScalarType;

/// How one token is turned into a JSON value.
#[derive(Debug, Clone)]
enum TokenKind {
    Scalar(ScalarType),
    Choices(Vec<Value>),
    KeyValue(ScalarType),
}

/// Value parser yielding [`serde_json::Value`]s.
#[derive(Debug, Clone)]
pub(super) struct TokenParser {
    kind: TokenKind,
}

impl TokenParser {
    /// Chooses the coercion for a value-taking descriptor.
    pub(super) fn for_option(option: &OptionDescriptor) -> Self {
        let scalar = option.value.clone().unwrap_or(ScalarType::Str);
        let kind = match (&option.choices, option.action) {
            (_, OptionAction::StoreKeyValue) => TokenKind::KeyValue(scalar),
            (Some(choices), _) => TokenKind::Choices(choices.clone()),
            (None, _) => TokenKind::Scalar(scalar),
        };
        Self { kind }
    }
}

/// Text shown for a choice and matched against tokens.
pub(super) fn display_choice(choice: &Value) -> String {
    match choice {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn invalid_value(cmd: &Command, arg: Option<&Arg>, raw: &str, reason: &str) -> clap::Error {
    let target = arg.map_or_else(|| "argument".to_owned(), |a| format!("'{a}'"));
    clap::Error::raw(
        ErrorKind::InvalidValue,
        format!("invalid value '{raw}' for {target}: {reason}\n"),
    )
    .with_cmd(cmd)
}

impl TypedValueParser for TokenParser {
    type Value = Value;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let raw = value
            .to_str()
            .ok_or_else(|| clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd))?;
        match &self.kind {
            TokenKind::Scalar(scalar) => scalar
                .coerce(raw)
                .map_err(|reason| invalid_value(cmd, arg, raw, &reason)),
            TokenKind::Choices(choices) => choices
                .iter()
                .find(|choice| display_choice(choice) == raw)
                .cloned()
                .ok_or_else(|| {
                    let allowed: Vec<_> = choices.iter().map(display_choice).collect();
                    let reason = format!("possible values: {}", allowed.join(", "));
                    invalid_value(cmd, arg, raw, &reason)
                }),
            TokenKind::KeyValue(scalar) => {
                let Some((key, rest)) = raw.split_once('=') else {
                    let reason = ArgifyError::TokenFormat {
                        token: raw.to_owned(),
                    }
                    .to_string();
                    return Err(invalid_value(cmd, arg, raw, &reason));
                };
                let coerced = scalar
                    .coerce(rest)
                    .map_err(|reason| invalid_value(cmd, arg, raw, &reason))?;
                let mut entry = Map::new();
                entry.insert(key.to_owned(), coerced);
                Ok(Value::Object(entry))
            }
        }
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        match &self.kind {
            TokenKind::Choices(choices) => Some(Box::new(
                choices
                    .iter()
                    .map(|choice| PossibleValue::new(display_choice(choice))),
            )),
            TokenKind::Scalar(_) | TokenKind::KeyValue(_) => None,
        }
    }
}
