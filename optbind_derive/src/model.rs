use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

/// The contents of one `#[opt(..)]` attribute.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IntermediateAttributes {
    pub singletons: HashSet<String>,
    pub pairs: HashMap<String, Vec<DeriveValue>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveOption {
    pub field_name: syn::Ident,
    pub name: Option<DeriveValue>,
    pub gloss: Option<DeriveValue>,
    pub required: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveOptions {
    pub struct_name: syn::Ident,
    pub group: Option<DeriveValue>,
    pub options: Vec<DeriveOption>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveVariant {
    pub variant_name: syn::Ident,
    pub literal: Option<DeriveValue>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveChoices {
    pub enum_name: syn::Ident,
    pub variants: Vec<DeriveVariant>,
}
