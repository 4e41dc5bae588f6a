use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

/// Checks a props struct at compile time: it must satisfy `Props`, and it
/// may not have a field named `key`, which `element!` reserves for the
/// element's key.
pub(crate) fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    if let Data::Struct(data) = &input.data {
        if let Fields::Named(fields) = &data.fields {
            if let Some(field) = fields
                .named
                .iter()
                .find(|field| field.ident.as_ref().is_some_and(|ident| ident == "key"))
            {
                return Err(syn::Error::new_spanned(
                    field,
                    "the `key` property name is reserved",
                ));
            }
        }
    } else {
        return Err(syn::Error::new_spanned(&input.ident, "props must be a struct"));
    }

    let name = &input.ident;
    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        const _: () = {
            #[allow(dead_code)]
            fn assert_props #impl_generics () #where_clause {
                fn is_props<P: ::hookterm_core::Props>() {}
                is_props::<#name #type_generics>();
            }
        };
    })
}
