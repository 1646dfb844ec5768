//! `#[derive(Fillable)]`.
//!
//! Fields marked `#[fillable]` form the mass-assignment whitelist, in
//! declaration order. `#[fillable(rename = "key")]` uses a different input
//! key. The generated `fill` decodes each present key into the field type
//! through `crudline::decode_field` and collects decoding failures as field
//! errors instead of stopping at the first.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, Ident, LitStr, Meta, Type, ext::IdentExt,
    parse_macro_input,
};

struct FillableField {
    ident: Ident,
    key: String,
    ty: Type,
}

/// Implementation of the `Fillable` derive.
pub fn derive_fillable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "Fillable can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Fillable can only be derived for structs",
            ));
        }
    };

    let mut fillable = Vec::new();
    for field in fields {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("fillable")) else {
            continue;
        };
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let key = fillable_key(attr, &ident)?;
        fillable.push(FillableField {
            ident,
            key,
            ty: field.ty.clone(),
        });
    }

    let keys: Vec<&String> = fillable.iter().map(|f| &f.key).collect();
    let assignments = fillable.iter().map(|FillableField { ident, key, ty }| {
        quote! {
            if let ::std::option::Option::Some(value) = input.get(#key) {
                match ::crudline::decode_field::<#ty>(value) {
                    ::std::result::Result::Ok(decoded) => self.#ident = decoded,
                    ::std::result::Result::Err(err) => errors.add(#key, err.to_string()),
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::crudline::Fillable for #name #ty_generics #where_clause {
            fn fillable(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![#(::std::string::String::from(#keys)),*]
            }

            #[allow(unused_variables, unused_mut)]
            fn fill(
                &mut self,
                input: &::crudline::InputMap,
            ) -> ::std::result::Result<(), ::crudline::ValidationError> {
                let mut errors = ::crudline::FieldErrors::new();
                #(#assignments)*
                errors.into_result()
            }
        }
    })
}

fn fillable_key(attr: &Attribute, ident: &Ident) -> syn::Result<String> {
    let default = ident.unraw().to_string();
    match &attr.meta {
        Meta::Path(_) => Ok(default),
        Meta::List(_) => {
            let mut key = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    key = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown fillable option, expected `rename`"))
                }
            })?;
            Ok(key.unwrap_or(default))
        }
        Meta::NameValue(value) => Err(syn::Error::new_spanned(
            value,
            "expected `#[fillable]` or `#[fillable(rename = \"...\")]`",
        )),
    }
}
