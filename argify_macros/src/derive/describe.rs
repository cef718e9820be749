//! Expansion of `#[derive(Describe)]` for enums.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Fields, Variant};

use super::crate_path;
use super::parse::{SerdeRenameAll, parse_struct_attrs, serde_field_attrs, serde_rename_all};

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let syn::Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Describe can only be derived for enums; derive Schema for structs",
        ));
    };
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let krate = crate_path::resolve(struct_attrs.crate_path.as_ref());
    let rename_all = serde_rename_all(&input.attrs)?;

    let ident = &input.ident;
    let name = struct_attrs
        .name
        .clone()
        .unwrap_or_else(|| ident.unraw().to_string());

    let mut units = Vec::new();
    let mut wrapped = Vec::new();
    for variant in &data.variants {
        let serde = serde_field_attrs(&variant.attrs)?;
        if serde.skip {
            continue;
        }
        match &variant.fields {
            Fields::Unit => units.push(
                serde
                    .rename
                    .unwrap_or_else(|| variant_name(variant, rename_all)),
            ),
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                wrapped.extend(fields.unnamed.first().map(|f| f.ty.clone()));
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "Describe supports unit variants and single-value tuple variants",
                ));
            }
        }
    }

    let body = if wrapped.is_empty() {
        quote! {
            {
                let variants: &[&str] = &[#(#units),*];
                #krate::DeclaredType::Enum(#krate::EnumType::new(#name, variants.iter().copied()))
            }
        }
    } else {
        let literal = (!units.is_empty()).then(|| {
            quote! { #krate::DeclaredType::literal([#(#units),*]), }
        });
        quote! {
            #krate::DeclaredType::Union(::std::vec![
                #(<#wrapped as #krate::Describe>::declared_type(),)*
                #literal
            ])
        }
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics #krate::Describe for #ident #ty_generics #where_clause {
            fn declared_type() -> #krate::DeclaredType {
                #body
            }
        }
    })
}

fn variant_name(variant: &Variant, rename_all: Option<SerdeRenameAll>) -> String {
    let raw = variant.ident.unraw().to_string();
    rename_all.map_or_else(|| raw.clone(), |rule| rule.apply_to_variant(&raw))
}
