//! Literal parsing helpers for derive attributes.

use syn::punctuated::Punctuated;
use syn::{Lit, LitStr, Token, bracketed};

/// Parses a literal from a field attribute using `extractor`.
fn parse_lit<T, F>(meta: &syn::meta::ParseNestedMeta, key: &str, extractor: F) -> syn::Result<T>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a string")))
}

/// Parses a string literal from a field attribute.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    parse_lit(meta, key, |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses `key = [lit, lit, ...]`.
pub(crate) fn lit_list(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<Vec<Lit>> {
    let input = meta.value()?;
    if !input.peek(syn::token::Bracket) {
        return Err(meta.error(format!("{key} expects a bracketed list")));
    }
    let content;
    bracketed!(content in input);
    let items = Punctuated::<Lit, Token![,]>::parse_terminated(&content)?;
    Ok(items.into_iter().collect())
}

/// Parses `key = "value"` or `key = ["a", "b"]` into owned strings.
pub(crate) fn string_list(
    meta: &syn::meta::ParseNestedMeta,
    key: &str,
) -> syn::Result<Vec<String>> {
    let lookahead = meta.input.fork();
    lookahead.parse::<Token![=]>()?;
    if !lookahead.peek(syn::token::Bracket) {
        return Ok(vec![lit_str(meta, key)?.value()]);
    }
    lit_list(meta, key)?
        .into_iter()
        .map(|lit| match lit {
            Lit::Str(s) => Ok(s.value()),
            other => Err(syn::Error::new(
                other.span(),
                format!("{key} entries must be strings"),
            )),
        })
        .collect()
}
