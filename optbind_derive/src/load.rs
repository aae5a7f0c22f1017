use crate::model::{DeriveValue, IntermediateAttributes};
use crate::ATTRIBUTE;

mod attribute;
mod choices;
mod options;

fn has_attribute(attrs: &[syn::Attribute]) -> bool {
    attrs
        .iter()
        .any(|attribute| attribute.path().is_ident(ATTRIBUTE))
}

// Every `#[opt(..)]` on an item is merged into one.
fn load_attributes(attrs: &[syn::Attribute]) -> Result<IntermediateAttributes, syn::Error> {
    let mut merged = IntermediateAttributes::default();

    for attribute in attrs {
        if attribute.path().is_ident(ATTRIBUTE) {
            let IntermediateAttributes { singletons, pairs } =
                IntermediateAttributes::try_from(attribute)?;
            merged.singletons.extend(singletons);

            for (key, values) in pairs {
                merged.pairs.entry(key).or_default().extend(values);
            }
        }
    }

    Ok(merged)
}

fn check_attributes(
    context: &syn::Ident,
    attributes: &IntermediateAttributes,
    singletons: &[&str],
    pairs: &[&str],
) -> Result<(), syn::Error> {
    let mut unexpected: Vec<&String> = attributes
        .singletons
        .iter()
        .filter(|key| !singletons.contains(&key.as_str()))
        .chain(
            attributes
                .pairs
                .keys()
                .filter(|key| !pairs.contains(&key.as_str())),
        )
        .collect();
    unexpected.sort();

    match unexpected.first() {
        Some(key) => Err(syn::Error::new(
            context.span(),
            format!("Invalid - unexpected attribute `{key}` on `{context}`."),
        )),
        None => Ok(()),
    }
}

// Like the builder, the final value of a repeated pair applies.
fn last_value(attributes: &IntermediateAttributes, key: &str) -> Option<DeriveValue> {
    attributes
        .pairs
        .get(key)
        .and_then(|values| values.last())
        .cloned()
}
