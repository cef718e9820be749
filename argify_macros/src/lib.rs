//! Derive macros for `argify`.
//!
//! `#[derive(Schema)]` turns a struct with named fields into a schema the
//! runtime crate can walk; `#[derive(Describe)]` lets enums appear as field
//! types. Both read `#[argify(...)]` attributes and honour the serde
//! attributes that change how a value is deserialized (`rename`,
//! `rename_all`, `default`, `flatten`, `skip`).

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `argify::Schema` (and `argify::Describe`).
///
/// Field attributes: `default = expr`, `alias = "..."`, `title = "..."`,
/// `description = "..."`, `cli = ["--flag", "-f"]`,
/// `cli_enable_prefix = "..."`, `cli_disable_prefix = "..."`,
/// `choices = [..]` and `skip`. Doc comments become descriptions.
///
/// Struct attributes: `name = "..."`, `cli_enable_prefix = "..."`,
/// `cli_disable_prefix = "..."` and `crate = "..."`.
#[proc_macro_derive(Schema, attributes(argify))]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::schema::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro for `argify::Describe` on enums.
///
/// Unit-only enums describe a closed set of variant names; enums whose
/// variants wrap a single value describe a union of the wrapped types.
#[proc_macro_derive(Describe, attributes(argify))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::describe::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
