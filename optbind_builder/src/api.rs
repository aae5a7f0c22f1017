mod coerce;
mod core;
mod field;
mod parameter;
mod random;
mod resource;

pub use self::core::*;
pub use coerce::*;
pub use parameter::*;
pub use random::*;
pub use resource::*;
