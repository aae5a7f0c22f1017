use crate::api::coerce::{Coerce, CoerceError};
use crate::api::resource::Resources;
use crate::model::TypeTag;
use crate::parser::AnonymousBinding;

/// The bottom of the parser object graph, where the field's type `T` is still known.
pub(crate) struct Binding<'a, T> {
    variable: &'a mut T,
}

impl<'a, T> Binding<'a, T> {
    pub(crate) fn new(variable: &'a mut T) -> Self {
        Self { variable }
    }
}

impl<'a, T: Coerce> AnonymousBinding for Binding<'a, T> {
    fn bind(
        &mut self,
        tokens: &[String],
        append: bool,
        resources: &Resources,
    ) -> Result<(), CoerceError> {
        // Checked before coercing: a rejected append must not open a resource.
        if append && !T::APPENDABLE {
            return Err(CoerceError::AppendUnsupported(T::type_tag()));
        }

        match T::coerce(tokens, resources)? {
            Some(value) if append => T::append(self.variable, value),
            Some(value) => {
                *self.variable = value;
                Ok(())
            }
            // "No value" leaves the field as it was.
            None => Ok(()),
        }
    }

    fn type_tag(&self) -> TypeTag {
        T::type_tag()
    }

    fn value_string(&self) -> String {
        self.variable.render()
    }

    fn choices(&self) -> Vec<&'static str> {
        T::choices()
    }
}
