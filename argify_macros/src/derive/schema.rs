//! Expansion of `#[derive(Schema)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Expr, ExprLit, Field, Fields, Lit, Type};

use super::crate_path;
use super::parse::{
    FieldAttrs, SerdeFieldAttrs, SerdeRenameAll, StructAttrs, doc_text, option_inner,
    parse_field_attrs, parse_struct_attrs, serde_container_default, serde_field_attrs,
    serde_rename_all,
};

/// Container-wide settings every field expansion needs.
struct Container<'a> {
    krate: &'a TokenStream,
    rename_all: Option<SerdeRenameAll>,
    default: bool,
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let syn::Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Schema can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Schema requires a struct with named fields",
        ));
    };

    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let krate = crate_path::resolve(struct_attrs.crate_path.as_ref());
    let container = Container {
        krate: &krate,
        rename_all: serde_rename_all(&input.attrs)?,
        default: serde_container_default(&input.attrs)?,
    };

    let mut bases = Vec::new();
    let mut fields = Vec::new();
    for field in &named.named {
        let attrs = parse_field_attrs(field)?;
        let serde = serde_field_attrs(&field.attrs)?;
        if attrs.skip || serde.skip {
            continue;
        }
        if serde.flatten {
            let ty = &field.ty;
            bases.push(quote! { .with_base(<#ty as #krate::Schema>::schema()) });
            continue;
        }
        fields.push(field_descriptor(field, &attrs, &serde, &container)?);
    }

    let ident = &input.ident;
    let name = struct_attrs
        .name
        .clone()
        .unwrap_or_else(|| ident.unraw().to_string());
    let config = config_tokens(&struct_attrs, &krate);
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Schema for #ident #ty_generics #where_clause {
            fn schema() -> #krate::SchemaType {
                #krate::SchemaType::new(#name)
                    #(#bases)*
                    #config
                    #(#fields)*
            }
        }

        impl #impl_generics #krate::Describe for #ident #ty_generics #where_clause {
            fn declared_type() -> #krate::DeclaredType {
                #krate::DeclaredType::record(<Self as #krate::Schema>::schema())
            }
        }
    })
}

fn config_tokens(attrs: &StructAttrs, krate: &TokenStream) -> TokenStream {
    if attrs.cli_enable_prefix.is_none() && attrs.cli_disable_prefix.is_none() {
        return TokenStream::new();
    }
    let enable = optional_string(attrs.cli_enable_prefix.as_deref());
    let disable = optional_string(attrs.cli_disable_prefix.as_deref());
    quote! {
        .with_config(#krate::SchemaConfig {
            cli_enable_prefix: #enable,
            cli_disable_prefix: #disable,
        })
    }
}

fn optional_string(value: Option<&str>) -> TokenStream {
    value.map_or_else(
        || quote! { ::core::option::Option::None },
        |s| quote! { ::core::option::Option::Some(::std::string::String::from(#s)) },
    )
}

fn field_descriptor(
    field: &Field,
    attrs: &FieldAttrs,
    serde: &SerdeFieldAttrs,
    container: &Container<'_>,
) -> syn::Result<TokenStream> {
    let krate = container.krate;
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
    };
    let name = ident.unraw().to_string();
    let ty = &field.ty;

    let declared = declared_type(ty, attrs, krate);
    let mut chain = vec![quote! { #krate::FieldDescriptor::new(#name, #declared) }];

    if let Some(key) = external_key(&name, attrs, serde, container.rename_all) {
        chain.push(quote! { .with_alias(#key) });
    }
    if let Some(default) = default_tokens(field, attrs, serde, container)? {
        chain.push(quote! { .with_default(#default) });
    }
    if let Some(title) = &attrs.title {
        chain.push(quote! { .with_title(#title) });
    }
    if let Some(description) = attrs.description.clone().or_else(|| doc_text(&field.attrs)) {
        chain.push(quote! { .with_description(#description) });
    }
    if !attrs.cli.is_empty() {
        let names = &attrs.cli;
        chain.push(quote! {
            .with_extra(
                "cli",
                #krate::__private::serde_json::Value::from(::std::vec![#(#names),*]),
            )
        });
    }
    if let Some(prefix) = &attrs.cli_enable_prefix {
        chain.push(quote! { .with_extra("cli_enable_prefix", #prefix) });
    }
    if let Some(prefix) = &attrs.cli_disable_prefix {
        chain.push(quote! { .with_extra("cli_disable_prefix", #prefix) });
    }

    Ok(quote! { .with_field(#(#chain)*) })
}

/// Explicit `alias` wins; otherwise the serde key when it differs from the
/// field name.
fn external_key(
    name: &str,
    attrs: &FieldAttrs,
    serde: &SerdeFieldAttrs,
    rename_all: Option<SerdeRenameAll>,
) -> Option<String> {
    if let Some(alias) = &attrs.alias {
        return Some(alias.clone());
    }
    let key = serde
        .rename
        .clone()
        .or_else(|| rename_all.map(|rule| rule.apply_to_field(name)))?;
    (key != name).then_some(key)
}

fn declared_type(ty: &Type, attrs: &FieldAttrs, krate: &TokenStream) -> TokenStream {
    if attrs.choices.is_empty() {
        return quote! { <#ty as #krate::Describe>::declared_type() };
    }
    let choices = &attrs.choices;
    let literal = quote! {
        #krate::DeclaredType::Literal(::std::vec![
            #(#krate::__private::serde_json::Value::from(#choices)),*
        ])
    };
    if option_inner(ty).is_some() {
        quote! { #krate::DeclaredType::optional(#literal) }
    } else {
        literal
    }
}

fn default_tokens(
    field: &Field,
    attrs: &FieldAttrs,
    serde: &SerdeFieldAttrs,
    container: &Container<'_>,
) -> syn::Result<Option<TokenStream>> {
    let krate = container.krate;
    let ty = &field.ty;
    if let Some(expr) = &attrs.default {
        let target = option_inner(ty).unwrap_or(ty);
        let value = if is_str_literal(expr) {
            quote! { ::core::convert::Into::into(#expr) }
        } else {
            quote! { #expr }
        };
        return Ok(Some(quote! {
            #krate::__private::default_value(&{
                let __argify_default: #target = #value;
                __argify_default
            })
        }));
    }
    match &serde.default {
        Some(Some(path)) => {
            let path: syn::ExprPath = syn::parse_str(path)
                .map_err(|err| syn::Error::new_spanned(field, err))?;
            return Ok(Some(quote! { #krate::__private::default_value(&#path()) }));
        }
        Some(None) => {
            return Ok(Some(quote! {
                #krate::__private::default_value(&<#ty as ::core::default::Default>::default())
            }));
        }
        None => {}
    }
    if container.default {
        let ident = &field.ident;
        return Ok(Some(quote! {
            #krate::__private::default_value(
                &<Self as ::core::default::Default>::default().#ident,
            )
        }));
    }
    if option_inner(ty).is_some() {
        return Ok(Some(quote! { #krate::__private::serde_json::Value::Null }));
    }
    Ok(None)
}

const fn is_str_literal(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Lit(ExprLit {
            lit: Lit::Str(_),
            ..
        })
    )
}
