mod base;
mod interface;
mod middleware;
mod printer;

pub use base::{ConfigError, OptionDescriptor, ParseError};
pub(crate) use base::{AnonymousBinding, Parser, ParserConfig};
pub use interface::*;
pub use middleware::OptionParser;
pub(crate) use printer::Printer;
pub use printer::ErrorContext;
