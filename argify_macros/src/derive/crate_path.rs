//! Crate path resolution for dependency aliasing support.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolves the path generated code uses to reach the runtime crate.
///
/// Defaults to `::argify`; `#[argify(crate = "...")]` overrides it.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::argify }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for crate path resolution with default and custom paths.
    #![expect(
        clippy::expect_used,
        reason = "tests panic to surface invalid fixtures"
    )]

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default(None, ":: argify")]
    #[case::custom(Some("my_alias"), "my_alias")]
    #[case::nested(Some("deps::argify"), "deps :: argify")]
    fn resolve_produces_expected_tokens(#[case] input: Option<&str>, #[case] expected: &str) {
        let parsed = input.map(|s| syn::parse_str::<syn::Path>(s).expect("valid path"));
        let tokens = resolve(parsed.as_ref());
        assert_eq!(tokens.to_string(), expected);
    }
}
