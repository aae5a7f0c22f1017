use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;

use crate::model::{DeriveChoices, DeriveValue};

impl TryFrom<DeriveChoices> for TokenStream2 {
    type Error = syn::Error;

    fn try_from(value: DeriveChoices) -> Result<Self, Self::Error> {
        let DeriveChoices {
            enum_name,
            variants,
        } = value;
        let literals: Vec<TokenStream2> = variants
            .iter()
            .map(|variant| match &variant.literal {
                Some(DeriveValue { tokens }) => tokens.clone(),
                None => {
                    let literal = variant.variant_name.unraw().to_string();
                    quote! { #literal }
                }
            })
            .collect();
        let from_index_arms: Vec<TokenStream2> = variants
            .iter()
            .enumerate()
            .map(|(index, variant)| {
                let variant_name = &variant.variant_name;
                quote! { #index => #enum_name::#variant_name, }
            })
            .collect();
        let literal_arms: Vec<TokenStream2> = variants
            .iter()
            .zip(literals.iter())
            .map(|(variant, literal)| {
                let variant_name = &variant.variant_name;
                quote! { #enum_name::#variant_name => #literal, }
            })
            .collect();

        Ok(quote! {
            impl ::optbind::OptEnum for #enum_name {
                fn literals() -> &'static [&'static str] {
                    &[#( #literals ),*]
                }

                fn from_literal_index(index: usize) -> Self {
                    match index {
                        #( #from_index_arms )*
                        _ => ::std::unreachable!("internal error - literal index out of range: {}", index),
                    }
                }

                fn literal(&self) -> &'static str {
                    match *self {
                        #( #literal_arms )*
                    }
                }
            }

            ::optbind::coerce_enum!(#enum_name);
        })
    }
}
