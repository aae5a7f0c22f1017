mod core;
mod model;
mod resolve;

pub(crate) use self::core::TokenScanner;
pub(crate) use self::model::{Event, Occurrence};
pub(crate) use self::resolve::{MatchError, NameIndex};
