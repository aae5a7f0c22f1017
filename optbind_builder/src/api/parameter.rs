use crate::api::coerce::Coerce;
use crate::api::field::Binding;
use crate::parser::OptionDescriptor;
#[cfg(feature = "unit_test")]
use crate::{api::core::OptParser, parser::ConfigError, parser::OptionParser};

/// An option, bound to a field of type `T`.
/// Used with [`Group::add`].
///
/// The option's name defaults to nothing in particular: it is always given explicitly.
/// Its gloss (help text) defaults to empty, and it is not required.
///
/// ### Example
/// ```
/// # use optbind_builder as optbind;
/// use optbind::{Opt, OptParser};
///
/// let mut count: i32 = 0;
/// let mut parser = OptParser::new()
///     .group("main", |group| {
///         group.add(Opt::new(&mut count, "count").gloss("How many.").required())
///     })
///     .build();
///
/// assert!(parser.parse_tokens(vec!["-count", "3"].as_slice()));
/// drop(parser);
/// assert_eq!(count, 3);
/// ```
pub struct Opt<'a, T> {
    variable: &'a mut T,
    name: String,
    gloss: Option<String>,
    required: bool,
}

impl<'a, T> std::fmt::Debug for Opt<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Opt[{t}, {name}, required={required}]",
            t = std::any::type_name::<T>(),
            name = self.name,
            required = self.required,
        )
    }
}

impl<'a, T: Coerce> Opt<'a, T> {
    /// Create an option named `name`, bound to `variable`.
    pub fn new(variable: &'a mut T, name: impl Into<String>) -> Self {
        Self {
            variable,
            name: name.into(),
            gloss: None,
            required: false,
        }
    }

    /// Document the help text for this option.
    /// If repeated, only the final gloss will apply.
    pub fn gloss(mut self, description: impl Into<String>) -> Self {
        self.gloss.replace(description.into());
        self
    }

    /// Require this option be specified when parsing.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub(crate) fn into_descriptor(self, group: &str) -> OptionDescriptor<'a>
    where
        T: 'a,
    {
        let Opt {
            variable,
            name,
            gloss,
            required,
        } = self;
        OptionDescriptor::new(
            group,
            name,
            gloss,
            required,
            Box::new(Binding::new(variable)),
        )
    }
}

/// A named group of options; every option's full name is `group.name`.
/// Created via [`OptParser::group`](crate::OptParser::group), or handed to [`Options::declare`](crate::Options::declare).
pub struct Group<'a> {
    name: String,
    options: Vec<OptionDescriptor<'a>>,
}

impl<'a> std::fmt::Debug for Group<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish()
    }
}

impl<'a> Group<'a> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::default(),
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build a [`Group`] for use in testing.
    ///
    /// ### Example
    /// ```
    /// # use optbind_builder as optbind;
    /// use optbind::{Group, Opt};
    ///
    /// // Function under test.
    /// // We want to make sure the setup_fn is wired up correctly.
    /// pub fn setup_fn<'a>(value: &'a mut i32) -> impl FnOnce(Group<'a>) -> Group<'a> {
    ///     |group| group.add(Opt::new(value, "value"))
    /// }
    ///
    /// let mut x: i32 = 1;
    /// let mut parser = setup_fn(&mut x)(Group::test_dummy()).build_parser().unwrap();
    /// assert!(parser.parse_tokens(vec!["-value", "2"].as_slice()));
    /// drop(parser);
    /// assert_eq!(x, 2);
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn test_dummy() -> Self {
        Group::new("test-dummy")
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build an [`OptionParser`] holding only this group, for testing.
    /// See [`Group::test_dummy`] for an example.
    #[cfg(feature = "unit_test")]
    pub fn build_parser(self) -> Result<OptionParser<'a>, ConfigError> {
        let name = self.name.clone();
        OptParser::new().group(name, move |_| self).build_parser()
    }

    /// The name of this group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an option to this group.
    /// The order options are added in is the order they are documented in.
    pub fn add<T: Coerce + 'a>(mut self, opt: Opt<'a, T>) -> Self {
        let descriptor = opt.into_descriptor(&self.name);
        self.options.push(descriptor);
        self
    }

    pub(crate) fn into_options(self) -> Vec<OptionDescriptor<'a>> {
        self.options
    }
}
