//! Flag naming policy.

use std::collections::BTreeSet;

use tracing::trace;

use super::SynthContext;
use crate::schema::{EXT_DISABLE_PREFIX, EXT_ENABLE_PREFIX, FieldDescriptor};
use crate::ArgifyResult;

/// Replaces underscores in `name` with `separator`.
#[must_use]
pub fn render_name(name: &str, separator: &str) -> String {
    name.replace('_', separator)
}

/// Derives the long flag for `name`.
///
/// # Examples
///
/// ```
/// use argify::derive_flag;
///
/// assert_eq!(derive_flag("max_retries", "-"), "--max-retries");
/// assert_eq!(derive_flag("max_retries", "_"), "--max_retries");
/// ```
#[must_use]
pub fn derive_flag(name: &str, separator: &str) -> String {
    format!("--{}", render_name(name, separator))
}

/// Rendered names a field is known by: alias first, then the field name.
fn stems(field: &FieldDescriptor, ctx: &SynthContext<'_>) -> Vec<String> {
    let mut stems = Vec::with_capacity(2);
    for name in field.alias().into_iter().chain([field.name()]) {
        let stem = format!("{}{}", ctx.flag_prefix, render_name(name, ctx.separator));
        if !stems.contains(&stem) {
            stems.push(stem);
        }
    }
    stems
}

/// Long flags of a value-taking field.
pub(super) fn long_flags(
    field: &FieldDescriptor,
    ctx: &SynthContext<'_>,
) -> ArgifyResult<Vec<String>> {
    if let Some(explicit) = field.cli_names()? {
        return Ok(explicit);
    }
    Ok(stems(field, ctx)
        .into_iter()
        .map(|stem| format!("--{stem}"))
        .collect())
}

/// Stems a boolean field's enable and disable prefixes are applied to.
///
/// Explicit `cli` names are used as stems with any leading dashes removed.
pub(super) fn boolean_stems(
    field: &FieldDescriptor,
    ctx: &SynthContext<'_>,
) -> ArgifyResult<Vec<String>> {
    Ok(match field.cli_names()? {
        Some(explicit) => explicit
            .iter()
            .map(|name| name.trim_start_matches('-').to_owned())
            .collect(),
        None => stems(field, ctx),
    })
}

/// Which half of a boolean pair a prefix belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Switch {
    Enable,
    Disable,
}

/// Resolves a boolean prefix: field extension, then schema configuration,
/// then `--enable`/`--disable` joined with the separator.
pub(super) fn prefix(
    field: &FieldDescriptor,
    ctx: &SynthContext<'_>,
    switch: Switch,
) -> ArgifyResult<String> {
    let (key, configured, word) = match switch {
        Switch::Enable => (EXT_ENABLE_PREFIX, &ctx.config.cli_enable_prefix, "enable"),
        Switch::Disable => (
            EXT_DISABLE_PREFIX,
            &ctx.config.cli_disable_prefix,
            "disable",
        ),
    };
    if let Some(own) = field.extension_str(key)? {
        return Ok(own.to_owned());
    }
    Ok(configured
        .clone()
        .unwrap_or_else(|| format!("--{word}{}", ctx.separator)))
}

/// One-letter short flag for `name`, unless the token is already taken.
pub(super) fn short_flag(name: &str, claimed: &BTreeSet<String>) -> Option<String> {
    let first = name.chars().next().filter(char::is_ascii_alphanumeric)?;
    let short = format!("-{first}");
    if claimed.contains(&short) {
        trace!(field = name, short = %short, "short flag already claimed");
        return None;
    }
    Some(short)
}
