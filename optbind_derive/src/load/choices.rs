use crate::load::{check_attributes, last_value, load_attributes};
use crate::model::{DeriveChoices, DeriveVariant};
use crate::MACRO_OPT_ENUM;

impl TryFrom<syn::DeriveInput> for DeriveChoices {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let enum_name = &value.ident;

        match &value.data {
            syn::Data::Enum(de) => {
                let variants = de
                    .variants
                    .iter()
                    .map(DeriveVariant::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DeriveChoices {
                    enum_name: enum_name.clone(),
                    variants,
                })
            }
            _ => Err(syn::Error::new(
                enum_name.span(),
                format!("Invalid - {MACRO_OPT_ENUM} only applies to 'enum' data structures."),
            )),
        }
    }
}

impl TryFrom<&syn::Variant> for DeriveVariant {
    type Error = syn::Error;

    fn try_from(value: &syn::Variant) -> Result<Self, Self::Error> {
        let variant_name = value.ident.clone();

        if !matches!(value.fields, syn::Fields::Unit) {
            return Err(syn::Error::new(
                variant_name.span(),
                format!("Invalid - {MACRO_OPT_ENUM} variant `{variant_name}` cannot have fields."),
            ));
        }

        let attributes = load_attributes(&value.attrs)?;
        check_attributes(&variant_name, &attributes, &[], &["name"])?;

        Ok(DeriveVariant {
            literal: last_value(&attributes, "name"),
            variant_name,
        })
    }
}
