use tracing::debug;

use crate::api::parameter::Group;
use crate::api::resource::{Encoding, OpenPolicy};
use crate::parser::{
    ConfigError, ConsoleInterface, OptionParser, Parser, ParserConfig, Printer, UserInterface,
};

/// A struct whose fields are options, declared under one group.
///
/// Usually generated with `#[derive(Options)]`, but may be implemented by hand.
///
/// ### Example
/// ```
/// # use optbind_builder as optbind;
/// use optbind::{Group, Opt, OptParser, Options};
///
/// #[derive(Default)]
/// struct Settings {
///     verbose: bool,
///     depth: i16,
/// }
///
/// impl Options for Settings {
///     fn group_name() -> &'static str {
///         "Settings"
///     }
///
///     fn declare<'a>(&'a mut self, group: Group<'a>) -> Group<'a> {
///         group
///             .add(Opt::new(&mut self.verbose, "verbose"))
///             .add(Opt::new(&mut self.depth, "depth").gloss("How deep to go."))
///     }
/// }
///
/// let mut settings = Settings::default();
/// let mut parser = OptParser::new().register(&mut settings).build();
///
/// assert!(parser.parse_tokens(vec!["-verb", "-Settings.depth", "3"].as_slice()));
/// drop(parser);
/// assert!(settings.verbose);
/// assert_eq!(settings.depth, 3);
/// ```
pub trait Options {
    /// The group name used by [`OptParser::register`].
    fn group_name() -> &'static str;

    /// Add each option field to the `group`, in declaration order.
    fn declare<'a>(&'a mut self, group: Group<'a>) -> Group<'a>;

    /// Parse the Cli [`std::env::args`] into a default instance.
    ///
    /// If building or parsing fails (including when `-help` is requested), exits with error code `1` (via [`std::process::exit`]).
    fn parse_args() -> Self
    where
        Self: Default + Sized,
    {
        let mut target = Self::default();
        let mut parser = OptParser::new().register(&mut target).build();

        if !parser.parse() {
            std::process::exit(1);
        }

        drop(parser);
        target
    }
}

/// The option parser builder.
///
/// ### Example
/// ```
/// # use optbind_builder as optbind;
/// use optbind::{Opt, OptParser};
///
/// let mut name = String::default();
/// let mut tags: Vec<String> = Vec::default();
/// let mut parser = OptParser::new()
///     .group("app", |group| {
///         group
///             .add(Opt::new(&mut name, "name").required())
///             .add(Opt::new(&mut tags, "tags"))
///     })
///     .build();
///
/// assert!(parser.parse_tokens(vec!["-name", "x", "+tags", "a", "+tags", "b"].as_slice()));
/// drop(parser);
/// assert_eq!(name, "x");
/// assert_eq!(tags, vec!["a", "b"]);
/// ```
pub struct OptParser<'a> {
    groups: Vec<Group<'a>>,
    config: ParserConfig,
    deferred_error: Option<ConfigError>,
}

impl<'a> std::fmt::Debug for OptParser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptParser")
            .field("groups", &self.groups)
            .field("config", &self.config)
            .finish()
    }
}

impl<'a> Default for OptParser<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> OptParser<'a> {
    /// Create an option parser builder.
    pub fn new() -> Self {
        Self {
            groups: Vec::default(),
            config: ParserConfig::default(),
            deferred_error: None,
        }
    }

    /// Register the options of `target` under its [`Options::group_name`].
    pub fn register<O: Options>(self, target: &'a mut O) -> Self {
        self.register_as(O::group_name(), target)
    }

    /// Register the options of `target` under the group `name`.
    ///
    /// ### Example
    /// ```
    /// # use optbind_builder as optbind;
    /// use optbind::{Group, Opt, OptParser, Options};
    ///
    /// #[derive(Default)]
    /// struct Window {
    ///     width: i32,
    /// }
    ///
    /// impl Options for Window {
    ///     fn group_name() -> &'static str {
    ///         "Window"
    ///     }
    ///
    ///     fn declare<'a>(&'a mut self, group: Group<'a>) -> Group<'a> {
    ///         group.add(Opt::new(&mut self.width, "width"))
    ///     }
    /// }
    ///
    /// let mut left = Window::default();
    /// let mut right = Window::default();
    /// let mut parser = OptParser::new()
    ///     .register_as("left", &mut left)
    ///     .register_as("right", &mut right)
    ///     .build();
    ///
    /// assert!(parser.parse_tokens(vec!["-left.width", "1", "-right.width", "2"].as_slice()));
    /// drop(parser);
    /// assert_eq!(left.width, 1);
    /// assert_eq!(right.width, 2);
    /// ```
    pub fn register_as<O: Options>(self, name: impl Into<String>, target: &'a mut O) -> Self {
        self.group(name, move |group| target.declare(group))
    }

    /// Register a group of options through the builder Api.
    ///
    /// Registering the same group name twice is reported when the parser is built.
    pub fn group(
        mut self,
        name: impl Into<String>,
        setup_fn: impl FnOnce(Group<'a>) -> Group<'a>,
    ) -> Self {
        let name = name.into();

        if self.groups.iter().any(|group| group.name() == name) {
            // Only the first misconfiguration is reported.
            self.deferred_error
                .get_or_insert(ConfigError::DuplicateGroup(name));
        } else {
            debug!(group = %name, "registered group");
            self.groups.push(setup_fn(Group::new(name)));
        }

        self
    }

    /// Skip unknown options instead of failing.
    /// Other parse failures are then reported, but do not stop parsing.
    pub fn ignore_unknown_options(mut self) -> Self {
        self.config.ignore_unknown = true;
        self
    }

    /// Only match option markers against full names (`group.name`).
    pub fn must_match_full_name(mut self) -> Self {
        self.config.full_name_only = true;
        self
    }

    /// Do not fail when required options are unspecified.
    pub fn relax_required(mut self) -> Self {
        self.config.relax_required = true;
        self
    }

    /// What to do when a resource option cannot be opened.
    pub fn resource_policy(mut self, policy: OpenPolicy) -> Self {
        self.config.resources.policy = policy;
        self
    }

    /// The encoding for reading resource options.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.config.resources.encoding = encoding;
        self
    }

    /// Build the option parser, displaying through `user_interface`.
    pub fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<OptionParser<'a>, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let descriptors = self
            .groups
            .into_iter()
            .flat_map(Group::into_options)
            .collect();
        let parser = Parser::new(descriptors, self.config)?;

        Ok(OptionParser::new(parser, Printer::terminal(), user_interface))
    }

    /// Build the option parser as a `Result`.
    /// This gives the programmer the opportunity to handle configuration errors.
    pub fn build_parser(self) -> Result<OptionParser<'a>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the option parser.
    ///
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> OptionParser<'a> {
        match self.build_parser() {
            Ok(option_parser) => option_parser,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::parameter::Opt;
    use crate::api::{Input, OptEnum};
    use crate::parser::util::channel_interface;
    use crate::test::assert_contains;
    use rstest::rstest;

    #[derive(Debug, Default, PartialEq)]
    enum Color {
        #[default]
        Red,
        Green,
    }

    impl OptEnum for Color {
        fn literals() -> &'static [&'static str] {
            &["Red", "Green"]
        }

        fn from_literal_index(index: usize) -> Self {
            match index {
                0 => Color::Red,
                1 => Color::Green,
                _ => unreachable!("un-planned test case"),
            }
        }

        fn literal(&self) -> &'static str {
            match self {
                Color::Red => "Red",
                Color::Green => "Green",
            }
        }
    }

    crate::coerce_enum!(Color);

    #[derive(Debug, Default)]
    struct Settings {
        alpha: bool,
        alphabeta: i32,
        color: Color,
        list: Vec<String>,
        ratio: f64,
    }

    impl Options for Settings {
        fn group_name() -> &'static str {
            "group"
        }

        fn declare<'a>(&'a mut self, group: Group<'a>) -> Group<'a> {
            group
                .add(Opt::new(&mut self.alpha, "alpha"))
                .add(Opt::new(&mut self.alphabeta, "alphabeta").gloss("A number."))
                .add(Opt::new(&mut self.color, "color"))
                .add(Opt::new(&mut self.list, "list"))
                .add(Opt::new(&mut self.ratio, "ratio"))
        }
    }

    #[rstest]
    #[case(vec![], false, 0)]
    #[case(vec!["-alpha"], true, 0)]
    #[case(vec!["-alpha", "false"], false, 0)]
    #[case(vec!["-alpha", "TRUE", "-alphabeta", "5"], true, 5)]
    #[case(vec!["-alphab", "2147483647"], false, i32::MAX)]
    #[case(vec!["-group.alphabeta", "--", "-2147483648"], false, i32::MIN)]
    #[case(vec!["-alphabeta", "MIN"], false, i32::MIN)]
    fn build(#[case] tokens: Vec<&str>, #[case] expected_alpha: bool, #[case] expected_alphabeta: i32) {
        // Setup
        let mut target = Settings::default();
        let (sender, _receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .register(&mut target)
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&tokens);

        // Verify
        assert!(result);
        drop(option_parser);
        assert_eq!(target.alpha, expected_alpha);
        assert_eq!(target.alphabeta, expected_alphabeta);
    }

    #[rstest]
    #[case("inf", f64::INFINITY)]
    #[case("-inf", f64::NEG_INFINITY)]
    #[case("MAX", f64::INFINITY)]
    #[case("1.5", 1.5)]
    fn build_double(#[case] token: &str, #[case] expected: f64) {
        // Setup
        let mut target = Settings::default();
        let (sender, _receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .register(&mut target)
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&["-ratio", "--", token]);

        // Verify
        assert!(result);
        drop(option_parser);
        assert_eq!(target.ratio, expected);
    }

    #[test]
    fn build_ambiguous() {
        // Setup
        let mut target = Settings::default();
        let (sender, receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .ignore_unknown_options()
            .register(&mut target)
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&["-alp", "1"]);

        // Verify
        assert!(!result);
        let (message, error, _) = receiver.consume();
        assert_eq!(message, None);
        let error = error.unwrap();
        assert_contains!(error, "ambiguous option 'alp'");
        assert_contains!(error, "group.alpha ");
        assert_contains!(error, "group.alphabeta ");
    }

    #[test]
    fn build_enum() {
        // Setup
        let mut target = Settings::default();
        let (sender, receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .register(&mut target)
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        assert!(option_parser.parse_tokens(&["-color", "gREEN"]));
        let bad = option_parser.parse_tokens(&["-color", "blue"]);

        // Verify
        assert!(!bad);
        let (_, error, _) = receiver.consume();
        let error = error.unwrap();
        assert_contains!(error, "'group.color'");
        assert_contains!(error, "Red");
        assert_contains!(error, "Green");
        drop(option_parser);
        assert_eq!(target.color, Color::Green);
    }

    #[test]
    fn build_append_list() {
        // Setup
        let mut target = Settings::default();
        let (sender, _receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .register(&mut target)
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&["+list", "v1", "+list", "v2"]);

        // Verify
        assert!(result);
        assert_eq!(option_parser.descriptors()[3].string_repn(), Some("v1 v2"));
        drop(option_parser);
        assert_eq!(target.list, vec!["v1", "v2"]);
    }

    #[test]
    fn build_verbatim() {
        // Setup
        let mut target = Settings::default();
        let (sender, _receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .register(&mut target)
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&["-list", "---", "-alpha", "+x", "---", "-alpha"]);

        // Verify
        assert!(result);
        drop(option_parser);
        assert_eq!(target.list, vec!["-alpha", "+x"]);
        assert!(target.alpha);
    }

    #[test]
    fn build_register_as() {
        // Setup
        let mut left = Settings::default();
        let mut right = Settings::default();
        let (sender, _receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .must_match_full_name()
            .register_as("left", &mut left)
            .register_as("right", &mut right)
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&["-left.alphabeta", "1", "-RIGHT.ALPHABETA", "2"]);

        // Verify
        assert!(result);
        drop(option_parser);
        assert_eq!(left.alphabeta, 1);
        assert_eq!(right.alphabeta, 2);
    }

    #[test]
    fn build_duplicate_group() {
        // Setup
        let mut a = Settings::default();
        let mut b = Settings::default();

        // Execute
        let result = OptParser::new()
            .register(&mut a)
            .register(&mut b)
            .build_parser();

        // Verify
        assert_matches!(result, Err(ConfigError::DuplicateGroup(name)) => {
            assert_eq!(name, "group");
        });
    }

    #[test]
    fn build_duplicate_option() {
        // Setup
        let mut a: i32 = 0;
        let mut b: i32 = 0;

        // Execute
        let result = OptParser::new()
            .group("main", |group| {
                group
                    .add(Opt::new(&mut a, "value"))
                    .add(Opt::new(&mut b, "VALUE"))
            })
            .build_parser();

        // Verify
        assert_matches!(result, Err(ConfigError::DuplicateOption(name)) => {
            assert_eq!(name, "main.VALUE");
        });
    }

    #[test]
    fn build_required() {
        // Setup
        let mut a: i32 = 0;
        let mut b: i32 = 0;
        let (sender, receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .group("main", |group| {
                group
                    .add(Opt::new(&mut a, "a").required())
                    .add(Opt::new(&mut b, "b").required())
            })
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&["-a", "1"]);

        // Verify
        assert!(!result);
        let (_, error, _) = receiver.consume();
        let error = error.unwrap();
        assert_contains!(error, "main.b ");
        assert!(!error.contains("main.a "));
    }

    #[test]
    fn build_relax_required() {
        // Setup
        let mut a: i32 = 0;
        let (sender, _receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .relax_required()
            .group("main", |group| group.add(Opt::new(&mut a, "a").required()))
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&[]);

        // Verify
        assert!(result);
    }

    #[test]
    fn build_help() {
        // Setup
        let mut target = Settings::default();
        let (sender, receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .register(&mut target)
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&["-alpha", "-help"]);

        // Verify
        assert!(!result);
        let (message, error, _) = receiver.consume();
        assert_eq!(error, None);
        let message = message.unwrap();
        assert_contains!(message, "Usage:");
        assert_contains!(message, "group.alphabeta");
        assert_contains!(message, "[0]");
        assert_contains!(message, "Red|Green");
        drop(option_parser);
        assert!(!target.alpha);
    }

    #[rstest]
    #[case(OpenPolicy::Lenient, true)]
    #[case(OpenPolicy::Strict, false)]
    fn build_resource_policy(#[case] policy: OpenPolicy, #[case] expected: bool) {
        // Setup
        let mut input: Option<Input> = None;
        let (sender, _receiver) = channel_interface();
        let mut option_parser = OptParser::new()
            .resource_policy(policy)
            .encoding(Encoding::Latin1)
            .group("io", |group| group.add(Opt::new(&mut input, "input")))
            .build_with_interface(Box::new(sender))
            .unwrap();

        // Execute
        let result = option_parser.parse_tokens(&["-input", "/does/not/exist/anywhere"]);

        // Verify
        assert_eq!(result, expected);
        drop(option_parser);
        assert!(input.is_none());
    }
}
