use crate::parser::base::ParseError;
use crate::parser::ErrorContext;

/// The sink for everything the option parser displays: help, summary, and diagnostics.
///
/// Plug in a custom sink via [`OptParser::build_with_interface`](crate::OptParser::build_with_interface).
pub trait UserInterface {
    /// Display an informational line (help or summary).
    fn print(&self, message: String);

    /// Display a parse error.
    fn print_error(&self, error: ParseError);

    /// Display where in the input tokens a parse error occurred.
    fn print_error_context(&self, error_context: ErrorContext);
}

/// The default sink: `stdout` for information, `stderr` for errors.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
