use crate::load::{check_attributes, has_attribute, last_value, load_attributes};
use crate::model::{DeriveOption, DeriveOptions};
use crate::MACRO_OPTIONS;

impl TryFrom<syn::DeriveInput> for DeriveOptions {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let struct_name = value.ident.clone();
        let attributes = load_attributes(&value.attrs)?;
        check_attributes(&struct_name, &attributes, &[], &["group"])?;

        match &value.data {
            syn::Data::Struct(ds) => {
                let options = match &ds.fields {
                    syn::Fields::Named(fields) => fields
                        .named
                        .iter()
                        .filter(|field| has_attribute(&field.attrs))
                        .map(DeriveOption::try_from)
                        .collect::<Result<Vec<_>, _>>()?,
                    syn::Fields::Unit => Vec::default(),
                    syn::Fields::Unnamed(_) => {
                        return Err(syn::Error::new(
                            struct_name.span(),
                            format!("Invalid - {MACRO_OPTIONS} requires named fields."),
                        ));
                    }
                };

                Ok(DeriveOptions {
                    struct_name,
                    group: last_value(&attributes, "group"),
                    options,
                })
            }
            _ => Err(syn::Error::new(
                struct_name.span(),
                format!("Invalid - {MACRO_OPTIONS} only applies to 'struct' data structures."),
            )),
        }
    }
}

impl TryFrom<&syn::Field> for DeriveOption {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = value
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(value, "Invalid - option fields must be named."))?;
        let attributes = load_attributes(&value.attrs)?;
        check_attributes(&field_name, &attributes, &["required"], &["name", "gloss"])?;

        Ok(DeriveOption {
            name: last_value(&attributes, "name"),
            gloss: last_value(&attributes, "gloss"),
            required: attributes.singletons.contains("required"),
            field_name,
        })
    }
}
