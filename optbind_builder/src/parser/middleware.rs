use std::env;
use tracing::info;

use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;
use crate::parser::ErrorContext;

/// The configured option parser.
/// Built via [`OptParser::build`](crate::OptParser::build) or [`OptParser::build_parser`](crate::OptParser::build_parser).
///
/// The parser holds an exclusive borrow on every registered field; drop it to read the bound values.
pub struct OptionParser<'a> {
    parser: Parser<'a>,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> std::fmt::Debug for OptionParser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionParser")
            .field("descriptors", &self.parser.descriptors())
            .finish()
    }
}

impl<'a> OptionParser<'a> {
    pub(crate) fn new(
        parser: Parser<'a>,
        printer: Printer,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            parser,
            printer,
            user_interface,
        }
    }

    /// The registered options, in registration order.
    pub fn descriptors(&self) -> &[OptionDescriptor<'a>] {
        self.parser.descriptors()
    }

    /// Display the help message.
    pub fn print_help(&self) {
        self.printer
            .print_help(self.parser.descriptors(), &*self.user_interface);
    }

    /// Run the option parser against the input tokens.
    ///
    /// Parsing happens in three phases:
    /// 1. Token scanning aligns the tokens to option occurrences.
    /// If the help switch (`-help`) is encountered anywhere, the help message is displayed and nothing is bound.
    /// 2. Binding coerces the tokens of each occurrence into the matched field(s), in order.
    /// This phase will actually mutate your program variables.
    /// 3. Validation checks every required option was specified.
    ///
    /// Returns `true` when all phases succeed, after displaying the specified options.
    /// Otherwise the error is displayed and `false` is returned.
    /// Fields bound before a failure keep their new values.
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> bool {
        match self.parser.consume(tokens) {
            Ok(Action::PrintHelp) => {
                self.print_help();
                false
            }
            Ok(Action::Complete { swallowed }) => {
                for (offset, error) in swallowed {
                    self.report(offset, error, tokens);
                }

                match self.parser.validate() {
                    Ok(()) => {
                        let descriptors = self.parser.descriptors();
                        self.printer
                            .print_summary(descriptors, &*self.user_interface);
                        info!(
                            specified = descriptors.iter().filter(|d| d.specified()).count(),
                            "parsed options"
                        );
                        true
                    }
                    Err(error) => {
                        self.user_interface.print_error(error);
                        false
                    }
                }
            }
            Err((offset, error)) => {
                self.report(offset, error, tokens);
                false
            }
        }
    }

    /// Run the option parser against the Cli [`env::args`] (skipping the program name).
    ///
    /// See [`OptionParser::parse_tokens`].
    pub fn parse(&mut self) -> bool {
        let command_input: Vec<String> = env::args().skip(1).collect();
        self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }

    fn report(&self, offset: usize, error: ParseError, tokens: &[&str]) {
        self.user_interface.print_error(error);
        self.user_interface
            .print_error_context(ErrorContext::new(offset, tokens));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::base::test::Recorder;
    use crate::parser::util::channel_interface;
    use crate::test::assert_contains;
    use rstest::rstest;

    fn option_parser<'a>(
        recorders: Vec<(&str, bool, &'a mut Recorder)>,
        config: ParserConfig,
        user_interface: Box<dyn UserInterface>,
    ) -> OptionParser<'a> {
        let descriptors = recorders
            .into_iter()
            .map(|(name, required, recorder)| {
                OptionDescriptor::new("g", name, None, required, Box::new(recorder))
            })
            .collect();
        OptionParser::new(
            Parser::new(descriptors, config).unwrap(),
            Printer::empty(),
            user_interface,
        )
    }

    #[test]
    fn parse_tokens_empty() {
        // Setup
        let (sender, receiver) = channel_interface();
        let mut option_parser =
            option_parser(Vec::default(), ParserConfig::default(), Box::new(sender));

        // Execute
        let result = option_parser.parse_tokens(&[]);

        // Verify
        assert!(result);
        assert_eq!(receiver.consume_message(), "Specified options:");
    }

    #[test]
    fn parse_tokens() {
        // Setup
        let mut a = Recorder::default();
        let mut b = Recorder::default();
        let (sender, receiver) = channel_interface();
        let mut option_parser = option_parser(
            vec![("alpha", true, &mut a), ("beta", false, &mut b)],
            ParserConfig::default(),
            Box::new(sender),
        );

        // Execute
        let result = option_parser.parse_tokens(&["-alpha", "x", "y"]);

        // Verify
        assert!(result);
        assert_eq!(
            receiver.consume_message(),
            r#"Specified options:
   g.alpha = x y"#
        );
    }

    #[rstest]
    #[case(vec!["-help"])]
    #[case(vec!["-alpha", "x", "-help"])]
    #[case(vec!["-nope", "-help"])]
    fn parse_tokens_help(#[case] tokens: Vec<&str>) {
        // Setup
        let mut a = Recorder::default();
        let (sender, receiver) = channel_interface();
        let mut option_parser = option_parser(
            vec![("alpha", true, &mut a)],
            ParserConfig::default(),
            Box::new(sender),
        );

        // Execute
        let result = option_parser.parse_tokens(&tokens);

        // Verify
        assert!(!result);
        let (message, error, error_context) = receiver.consume();
        assert_eq!(
            message.unwrap(),
            r#"Usage:
   g.alpha                        <  str> *REQUIRED* :  []"#
        );
        // Required validation is skipped.
        assert_eq!(error, None);
        assert_eq!(error_context, None);
        drop(option_parser);
        assert!(a.bound.is_empty());
    }

    #[rstest]
    #[case(vec!["-nope"], "Parse error: unknown option 'nope'; -help for usage.", "-nope\n^")]
    #[case(vec!["stray", "-alpha"], "Parse error: argument not part of an option 'stray'.", "stray -alpha\n^")]
    #[case(vec!["-alpha", "1", "-nope"], "Parse error: unknown option 'nope'; -help for usage.", "-alpha 1 -nope\n         ^")]
    fn parse_tokens_error(
        #[case] tokens: Vec<&str>,
        #[case] expected_error: &str,
        #[case] expected_context: &str,
    ) {
        // Setup
        let mut a = Recorder::default();
        let (sender, receiver) = channel_interface();
        let mut option_parser = option_parser(
            vec![("alpha", false, &mut a)],
            ParserConfig::default(),
            Box::new(sender),
        );

        // Execute
        let result = option_parser.parse_tokens(&tokens);

        // Verify
        assert!(!result);
        let (message, error, error_context) = receiver.consume();
        assert_eq!(message, None);
        assert_eq!(error.unwrap(), expected_error);
        assert_eq!(error_context.unwrap().to_string(), expected_context);
    }

    #[test]
    fn parse_tokens_missing_required() {
        // Setup
        let mut a = Recorder::default();
        let mut b = Recorder::default();
        let (sender, receiver) = channel_interface();
        let mut option_parser = option_parser(
            vec![("alpha", true, &mut a), ("beta", true, &mut b)],
            ParserConfig::default(),
            Box::new(sender),
        );

        // Execute
        let result = option_parser.parse_tokens(&["-alpha"]);

        // Verify
        assert!(!result);
        let (message, error, error_context) = receiver.consume();
        assert_eq!(message, None);
        assert_eq!(
            error.unwrap(),
            r#"Parse error: missing required option(s):
   g.beta                         <  str> *REQUIRED* :  []"#
        );
        assert_eq!(error_context, None);
    }

    #[test]
    fn parse_tokens_relax_required() {
        // Setup
        let mut a = Recorder::default();
        let (sender, receiver) = channel_interface();
        let config = ParserConfig {
            relax_required: true,
            ..ParserConfig::default()
        };
        let mut option_parser =
            option_parser(vec![("alpha", true, &mut a)], config, Box::new(sender));

        // Execute
        let result = option_parser.parse_tokens(&[]);

        // Verify
        assert!(result);
        assert_eq!(receiver.consume_message(), "Specified options:");
    }

    #[test]
    fn parse_tokens_ignore_unknown() {
        // Setup
        let mut a = Recorder::default();
        let (sender, receiver) = channel_interface();
        let config = ParserConfig {
            ignore_unknown: true,
            ..ParserConfig::default()
        };
        let mut option_parser =
            option_parser(vec![("alpha", false, &mut a)], config, Box::new(sender));

        // Execute
        let result = option_parser.parse_tokens(&["stray", "-nope", "-alpha", "1"]);

        // Verify
        assert!(result);
        let (message, error, error_context) = receiver.consume();
        assert_eq!(
            message.unwrap(),
            r#"Specified options:
   g.alpha = 1"#
        );
        let error = error.unwrap();
        assert_contains!(error, "'stray'");
        assert_eq!(error_context.unwrap().to_string(), "stray -nope -alpha 1\n^");
    }

    #[test]
    fn parse_tokens_repeated() {
        // Setup
        let mut a = Recorder::default();
        let (sender, receiver) = channel_interface();
        let mut option_parser = option_parser(
            vec![("alpha", false, &mut a)],
            ParserConfig::default(),
            Box::new(sender),
        );

        // Execute
        assert!(option_parser.parse_tokens(&["+alpha", "x"]));
        assert!(option_parser.parse_tokens(&["+alpha", "y"]));

        // Verify
        assert_eq!(option_parser.descriptors()[0].string_repn(), Some("x y"));
        let _ = receiver.consume();
        drop(option_parser);
        assert_eq!(a.bound.len(), 2);
    }
}
