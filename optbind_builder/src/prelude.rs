//! Traits which, typically, may be imported without concern: `use optbind::prelude::*`.

pub use crate::api::{Coerce, OptEnum, Options};
