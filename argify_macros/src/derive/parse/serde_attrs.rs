//! Serde attribute parsing helpers.
//!
//! The generated schema has to agree with serde on the external key of
//! every field and on which fields may be missing, otherwise a parsed
//! namespace would not deserialize back into the annotated type.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token};

/// Supported `#[serde(rename_all = "...")]` rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SerdeRenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl SerdeRenameAll {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebab),
            other => Err(syn::Error::new(
                value.span(),
                format!(
                    "unsupported serde rename_all value '{other}'; expected one of \
\"lowercase\", \"UPPERCASE\", \"PascalCase\", \"camelCase\", \"snake_case\", \
\"SCREAMING_SNAKE_CASE\", \"kebab-case\", or \"SCREAMING-KEBAB-CASE\""
                ),
            )),
        }
    }

    /// Applies the rule to a field name written in `snake_case`.
    pub(crate) fn apply_to_field(self, name: &str) -> String {
        match self {
            Self::Lower | Self::Snake => name.to_owned(),
            Self::Upper => name.to_ascii_uppercase(),
            Self::Pascal => name.to_upper_camel_case(),
            Self::Camel => name.to_lower_camel_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
            Self::Kebab => name.to_kebab_case(),
            Self::ScreamingKebab => name.to_shouty_kebab_case(),
        }
    }

    /// Applies the rule to a variant name written in `PascalCase`.
    pub(crate) fn apply_to_variant(self, name: &str) -> String {
        match self {
            Self::Pascal => name.to_owned(),
            Self::Lower => name.to_ascii_lowercase(),
            Self::Upper => name.to_ascii_uppercase(),
            Self::Camel => name.to_lower_camel_case(),
            Self::Snake => name.to_snake_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
            Self::Kebab => name.to_kebab_case(),
            Self::ScreamingKebab => name.to_shouty_kebab_case(),
        }
    }
}

/// Serde settings of a single field or variant that affect the schema.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SerdeFieldAttrs {
    /// `rename = "..."` or `rename(deserialize = "...")`.
    pub rename: Option<String>,
    /// `default` (`Some(None)`) or `default = "path"` (`Some(Some(path))`).
    pub default: Option<Option<String>>,
    pub flatten: bool,
    /// `skip` or `skip_deserializing`.
    pub skip: bool,
}

fn serde_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// Parse `#[serde(rename_all = "...")]` from container attributes.
///
/// `rename_all(deserialize = "...")` is honoured as well.
pub(crate) fn serde_rename_all(attrs: &[Attribute]) -> syn::Result<Option<SerdeRenameAll>> {
    let mut out = None;
    for attr in serde_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename_all") {
                return super::discard_unknown(&meta);
            }
            if meta.input.peek(Token![=]) {
                let value = meta.value()?.parse::<LitStr>()?;
                out = Some(SerdeRenameAll::parse(&value)?);
                return Ok(());
            }
            meta.parse_nested_meta(|nested| {
                if !nested.path.is_ident("deserialize") {
                    return super::discard_unknown(&nested);
                }
                let value = nested.value()?.parse::<LitStr>()?;
                out = Some(SerdeRenameAll::parse(&value)?);
                Ok(())
            })
        })?;
    }
    Ok(out)
}

/// Returns `true` when the container carries `#[serde(default)]`.
pub(crate) fn serde_container_default(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut out = false;
    for attr in serde_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") && !meta.input.peek(Token![=]) {
                out = true;
                return Ok(());
            }
            super::discard_unknown(&meta)
        })?;
    }
    Ok(out)
}

/// Parse the serde attributes of a field or variant.
pub(crate) fn serde_field_attrs(attrs: &[Attribute]) -> syn::Result<SerdeFieldAttrs> {
    let mut out = SerdeFieldAttrs::default();
    for attr in serde_attrs(attrs) {
        attr.parse_nested_meta(|meta| apply_serde_meta(&meta, &mut out))?;
    }
    Ok(out)
}

fn apply_serde_meta(meta: &ParseNestedMeta, out: &mut SerdeFieldAttrs) -> syn::Result<()> {
    let Some(ident) = meta.path.get_ident().map(ToString::to_string) else {
        return super::discard_unknown(meta);
    };
    match ident.as_str() {
        "rename" => parse_rename(meta, &mut out.rename),
        "default" => {
            out.default = Some(if meta.input.peek(Token![=]) {
                Some(meta.value()?.parse::<LitStr>()?.value())
            } else {
                None
            });
            Ok(())
        }
        "flatten" => {
            out.flatten = true;
            Ok(())
        }
        "skip" | "skip_deserializing" => {
            out.skip = true;
            Ok(())
        }
        _ => super::discard_unknown(meta),
    }
}

fn parse_rename(meta: &ParseNestedMeta, rename: &mut Option<String>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        *rename = Some(meta.value()?.parse::<LitStr>()?.value());
        return Ok(());
    }
    if !meta.input.peek(syn::token::Paren) {
        return Ok(());
    }
    meta.parse_nested_meta(|nested| {
        if !nested.path.is_ident("deserialize") {
            return super::discard_unknown(&nested);
        }
        *rename = Some(nested.value()?.parse::<LitStr>()?.value());
        Ok(())
    })
}
