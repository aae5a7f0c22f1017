use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;

use crate::model::{DeriveOption, DeriveOptions, DeriveValue};

impl TryFrom<DeriveOptions> for TokenStream2 {
    type Error = syn::Error;

    fn try_from(value: DeriveOptions) -> Result<Self, Self::Error> {
        let DeriveOptions {
            struct_name,
            group,
            options,
        } = value;
        let group_name = match group {
            Some(DeriveValue { tokens }) => tokens,
            None => {
                let name = struct_name.unraw().to_string();
                quote! { #name }
            }
        };
        let adds = options
            .into_iter()
            .map(TokenStream2::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(quote! {
            impl ::optbind::Options for #struct_name {
                fn group_name() -> &'static str {
                    #group_name
                }

                fn declare<'optbind>(
                    &'optbind mut self,
                    group: ::optbind::Group<'optbind>,
                ) -> ::optbind::Group<'optbind> {
                    group #( #adds )*
                }
            }
        })
    }
}

impl TryFrom<DeriveOption> for TokenStream2 {
    type Error = syn::Error;

    fn try_from(value: DeriveOption) -> Result<Self, Self::Error> {
        let DeriveOption {
            field_name,
            name,
            gloss,
            required,
        } = value;
        let name = match name {
            Some(DeriveValue { tokens }) => tokens,
            None => {
                let name = field_name.unraw().to_string();
                quote! { #name }
            }
        };
        let gloss = match gloss {
            Some(DeriveValue { tokens }) => quote! { .gloss(#tokens) },
            None => quote! {},
        };
        let required = if required {
            quote! { .required() }
        } else {
            quote! {}
        };

        Ok(quote! {
            .add(::optbind::Opt::new(&mut self.#field_name, #name) #gloss #required)
        })
    }
}
