//! Tests for `#[argify(...)]` and serde attribute parsing.

use super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, Field, Fields, parse_quote};

fn first_field(input: &DeriveInput) -> Result<&Field> {
    let syn::Data::Struct(data) = &input.data else {
        return Err(anyhow!("expected a struct"));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(anyhow!("expected named fields"));
    };
    named.named.first().ok_or_else(|| anyhow!("missing field"))
}

#[test]
fn parses_struct_and_field_attributes() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[argify(name = "Settings", cli_enable_prefix = "--on-", crate = "deps::argify")]
        struct Demo {
            #[argify(default = 5, alias = "n", cli = ["--count", "-c"], title = "Count")]
            number: u32,
        }
    };

    let struct_attrs = parse_struct_attrs(&input.attrs).map_err(|err| anyhow!(err))?;
    ensure!(struct_attrs.name.as_deref() == Some("Settings"), "name not parsed");
    ensure!(
        struct_attrs.cli_enable_prefix.as_deref() == Some("--on-"),
        "enable prefix not parsed"
    );
    ensure!(struct_attrs.cli_disable_prefix.is_none(), "unexpected disable prefix");
    ensure!(struct_attrs.crate_path.is_some(), "crate path not parsed");

    let attrs = parse_field_attrs(first_field(&input)?).map_err(|err| anyhow!(err))?;
    ensure!(attrs.default.is_some(), "default not parsed");
    ensure!(attrs.alias.as_deref() == Some("n"), "alias not parsed");
    ensure!(attrs.title.as_deref() == Some("Count"), "title not parsed");
    ensure!(attrs.cli == ["--count", "-c"], "cli list not parsed: {:?}", attrs.cli);
    ensure!(!attrs.skip, "skip set unexpectedly");
    Ok(())
}

#[rstest]
#[case::single(parse_quote! { #[argify(cli = "--only")] }, &["--only"])]
#[case::list(parse_quote! { #[argify(cli = ["--a", "--b"])] }, &["--a", "--b"])]
fn cli_accepts_string_or_list(
    #[case] attr: syn::Attribute,
    #[case] expected: &[&str],
) -> Result<()> {
    let field: Field = parse_quote! { #attr value: String };
    let attrs = parse_field_attrs(&field).map_err(|err| anyhow!(err))?;
    ensure!(attrs.cli == expected, "unexpected cli names {:?}", attrs.cli);
    Ok(())
}

#[test]
fn choices_accept_mixed_literals() -> Result<()> {
    let field: Field = parse_quote! {
        #[argify(choices = ["a", 1, true])]
        value: String
    };
    let attrs = parse_field_attrs(&field).map_err(|err| anyhow!(err))?;
    ensure!(attrs.choices.len() == 3, "expected three choices");
    Ok(())
}

#[rstest]
#[case::unknown_field_key(parse_quote! { #[argify(bogus = 1)] value: String })]
#[case::char_choice(parse_quote! { #[argify(choices = ['a'])] value: String })]
#[case::non_string_alias(parse_quote! { #[argify(alias = 3)] value: String })]
#[case::cli_list_of_ints(parse_quote! { #[argify(cli = [1, 2])] value: String })]
fn rejects_invalid_field_attributes(#[case] field: Field) {
    assert!(parse_field_attrs(&field).is_err());
}

#[test]
fn rejects_unknown_struct_attribute() {
    let input: DeriveInput = parse_quote! {
        #[argify(prefix = "X")]
        struct Demo { value: String }
    };
    assert!(parse_struct_attrs(&input.attrs).is_err());
}

#[test]
fn collects_doc_paragraphs() -> Result<()> {
    let field: Field = parse_quote! {
        /// First line
        /// continues here.
        ///
        /// Second paragraph.
        value: String
    };
    let text = doc_text(&field.attrs).ok_or_else(|| anyhow!("missing docs"))?;
    ensure!(
        text == "First line continues here.\n\nSecond paragraph.",
        "unexpected doc text {text:?}"
    );
    Ok(())
}

#[test]
fn missing_docs_yield_none() {
    let field: Field = parse_quote! { value: String };
    assert!(doc_text(&field.attrs).is_none());
}

#[rstest]
#[case::plain(parse_quote! { #[serde(rename = "x")] v: u8 }, Some("x"))]
#[case::deserialize(parse_quote! { #[serde(rename(serialize = "s", deserialize = "d"))] v: u8 }, Some("d"))]
#[case::serialize_only(parse_quote! { #[serde(rename(serialize = "s"))] v: u8 }, None)]
#[case::absent(parse_quote! { #[serde(skip_serializing_if = "Option::is_none")] v: u8 }, None)]
fn reads_serde_rename(#[case] field: Field, #[case] expected: Option<&str>) -> Result<()> {
    let attrs = serde_field_attrs(&field.attrs).map_err(|err| anyhow!(err))?;
    ensure!(attrs.rename.as_deref() == expected, "unexpected rename {:?}", attrs.rename);
    Ok(())
}

#[test]
fn reads_serde_default_flatten_and_skip() -> Result<()> {
    let field: Field = parse_quote! {
        #[serde(default = "defaults::port", flatten)]
        #[serde(skip_deserializing)]
        v: u16
    };
    let attrs = serde_field_attrs(&field.attrs).map_err(|err| anyhow!(err))?;
    ensure!(
        attrs.default == Some(Some("defaults::port".to_owned())),
        "default path not parsed"
    );
    ensure!(attrs.flatten, "flatten not parsed");
    ensure!(attrs.skip, "skip not parsed");
    Ok(())
}

#[rstest]
#[case::kebab("kebab-case", "max_retries", "max-retries")]
#[case::camel("camelCase", "max_retries", "maxRetries")]
#[case::upper("UPPERCASE", "max_retries", "MAX_RETRIES")]
#[case::pascal("PascalCase", "max_retries", "MaxRetries")]
fn rename_all_applies_to_fields(
    #[case] rule: &str,
    #[case] field: &str,
    #[case] expected: &str,
) -> Result<()> {
    let input: DeriveInput = syn::parse_str(&format!(
        "#[serde(rename_all = \"{rule}\")] struct Demo {{ v: u8 }}"
    ))?;
    let parsed = serde_rename_all(&input.attrs)
        .map_err(|err| anyhow!(err))?
        .ok_or_else(|| anyhow!("rename_all not parsed"))?;
    ensure!(parsed.apply_to_field(field) == expected, "wrong rename for {rule}");
    Ok(())
}

#[rstest]
#[case::lower("lowercase", "FastMode", "fastmode")]
#[case::kebab("kebab-case", "FastMode", "fast-mode")]
#[case::snake("snake_case", "FastMode", "fast_mode")]
fn rename_all_applies_to_variants(
    #[case] rule: &str,
    #[case] variant: &str,
    #[case] expected: &str,
) -> Result<()> {
    let input: DeriveInput =
        syn::parse_str(&format!("#[serde(rename_all = \"{rule}\")] enum Demo {{ A }}"))?;
    let parsed = serde_rename_all(&input.attrs)
        .map_err(|err| anyhow!(err))?
        .ok_or_else(|| anyhow!("rename_all not parsed"))?;
    ensure!(parsed.apply_to_variant(variant) == expected, "wrong rename for {rule}");
    Ok(())
}

#[test]
fn rejects_unknown_rename_rule() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[serde(rename_all = "Title Case")]
        struct Demo { v: u8 }
    };
    ensure!(serde_rename_all(&input.attrs).is_err(), "expected an error");
    Ok(())
}

#[rstest]
#[case::bare(parse_quote! { #[serde(default)] struct Demo { v: u8 } }, true)]
#[case::path(parse_quote! { #[serde(default = "make")] struct Demo { v: u8 } }, false)]
#[case::none(parse_quote! { #[serde(deny_unknown_fields)] struct Demo { v: u8 } }, false)]
fn detects_container_default(#[case] input: DeriveInput, #[case] expected: bool) -> Result<()> {
    ensure!(
        serde_container_default(&input.attrs).map_err(|err| anyhow!(err))? == expected,
        "container default mismatch"
    );
    Ok(())
}

#[rstest]
#[case::plain(parse_quote!(Option<u8>), true)]
#[case::qualified(parse_quote!(std::option::Option<String>), true)]
#[case::vec(parse_quote!(Vec<u8>), false)]
#[case::reference(parse_quote!(&'static str), false)]
fn recognises_option_types(#[case] ty: syn::Type, #[case] expected: bool) {
    assert_eq!(option_inner(&ty).is_some(), expected);
}
