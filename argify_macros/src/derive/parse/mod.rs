//! Parsing utilities for the `Schema` and `Describe` derive macros.

use syn::parenthesized;
use syn::{Attribute, Expr, Lit, Token};

mod docs;
mod literals;
mod serde_attrs;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use docs::doc_text;
use literals::{lit_str, string_list};
pub(crate) use serde_attrs::{
    SerdeFieldAttrs, SerdeRenameAll, serde_container_default, serde_field_attrs,
    serde_rename_all,
};
pub(crate) use type_utils::option_inner;

/// Struct-level `#[argify(...)]` settings.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Schema name; defaults to the struct identifier.
    pub name: Option<String>,
    pub cli_enable_prefix: Option<String>,
    pub cli_disable_prefix: Option<String>,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[argify(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `argify::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Schema)]`.
///
/// - `default` supplies the value used when the flag is not given.
/// - `alias` overrides the external key (and the first flag stem).
/// - `cli` lists explicit flag spellings.
/// - `choices` restricts the field to a fixed set of literals.
/// - `skip` leaves the field out of the schema entirely.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub default: Option<Expr>,
    pub alias: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cli: Vec<String>,
    pub cli_enable_prefix: Option<String>,
    pub cli_disable_prefix: Option<String>,
    pub choices: Vec<Lit>,
    pub skip: bool,
}

/// Iterate all `#[argify(...)]` attributes once and apply a callback.
fn parse_argify<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("argify")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn assign_str(
    target: &mut Option<String>,
    meta: &syn::meta::ParseNestedMeta,
    key: &str,
) -> syn::Result<()> {
    let value = lit_str(meta, key)?.value();
    *target = Some(value);
    Ok(())
}

/// Extracts `#[argify(...)]` metadata applied to a struct or enum.
///
/// Unknown keys are rejected so that typos surface at compile time.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_argify(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => assign_str(&mut out.name, meta, "name"),
            Some("cli_enable_prefix") => {
                assign_str(&mut out.cli_enable_prefix, meta, "cli_enable_prefix")
            }
            Some("cli_disable_prefix") => {
                assign_str(&mut out.cli_disable_prefix, meta, "cli_disable_prefix")
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => {
                discard_unknown(meta)?;
                Err(meta.error("unknown argify attribute"))
            }
        }
    })?;
    Ok(out)
}

/// Applies a recognised field attribute, returning `true` if handled.
fn apply_field_attr(meta: &syn::meta::ParseNestedMeta, out: &mut FieldAttrs) -> syn::Result<bool> {
    let Some(ident) = meta.path.get_ident() else {
        return Ok(false);
    };
    match ident.to_string().as_str() {
        "default" => out.default = Some(meta.value()?.parse()?),
        "alias" => assign_str(&mut out.alias, meta, "alias")?,
        "title" => assign_str(&mut out.title, meta, "title")?,
        "description" => assign_str(&mut out.description, meta, "description")?,
        "cli" => out.cli = string_list(meta, "cli")?,
        "cli_enable_prefix" => assign_str(&mut out.cli_enable_prefix, meta, "cli_enable_prefix")?,
        "cli_disable_prefix" => {
            assign_str(&mut out.cli_disable_prefix, meta, "cli_disable_prefix")?;
        }
        "choices" => out.choices = literals::lit_list(meta, "choices")?,
        "skip" => out.skip = true,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Parses field-level `#[argify(...)]` attributes.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_argify(&field.attrs, |meta| {
        if apply_field_attr(meta, &mut out)? {
            return Ok(());
        }
        discard_unknown(meta)?;
        Err(meta.error("unknown argify field attribute"))
    })?;
    if out.choices.is_empty() {
        return Ok(out);
    }
    if out.choices.iter().any(|lit| !is_json_literal(lit)) {
        return Err(syn::Error::new_spanned(
            field,
            "choices must be string, integer, float or boolean literals",
        ));
    }
    Ok(out)
}

const fn is_json_literal(lit: &Lit) -> bool {
    matches!(
        lit,
        Lit::Str(_) | Lit::Int(_) | Lit::Float(_) | Lit::Bool(_)
    )
}
