extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::{DeriveChoices, DeriveOptions};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

const MACRO_OPTIONS: &str = "Options";
const MACRO_OPT_ENUM: &str = "OptEnum";
const ATTRIBUTE: &str = "opt";

#[proc_macro_derive(Options, attributes(opt))]
pub fn options(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    DeriveOptions::try_from(derive_input)
        .and_then(TokenStream2::try_from)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro_derive(OptEnum, attributes(opt))]
pub fn opt_enum(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    DeriveChoices::try_from(derive_input)
        .and_then(TokenStream2::try_from)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
