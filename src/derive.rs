//! Derive Api for `optbind` configuration.
//!
//! ### Getting Started
//! Use the derive Api by instrumenting a struct `S` with `#[derive(Default, Options)]`, and each option field with `#[opt]`.
//! This implements [`Options`](crate::Options) for `S`, including `S::parse_args() -> S` which parses the Cli options into a default `S`.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_shuffle.rs")]
//! ```
//!
//! ### Options Configuration
//! Fields without an `#[opt]` attribute are left alone.
//! The following attributes may be combined as necessary:
//! * `#[opt(name = "..")]` sets the option's name; by default, the field identifier.
//! * `#[opt(gloss = "..")]` sets the option's help text.
//! * `#[opt(required)]` requires the option be specified.
//! * `#[opt(group = "..")]` on the struct sets the group name; by default, the struct identifier.
//!
//! A partial example of these rules is provided as follows:
//! ```ignore
//! #[derive(Default, Options)]
//! #[opt(group = "app")]
//! struct Settings {
//!     #[opt(gloss = "How many times.", required)]
//!     count: i32,
//!     // the above generates:
//!     //  .add(Opt::new(&mut self.count, "count").gloss("How many times.").required())
//!
//!     #[opt(name = "out")]
//!     output: String,
//!     // the above generates:
//!     //  .add(Opt::new(&mut self.output, "out"))
//! }
//! ```
//!
//! ### Enumerations
//! Instrument an enum with `#[derive(OptEnum)]` to bind it from its variant names (matched case-insensitively).
//! The variants may not carry fields.
//! Use `#[opt(name = "..")]` on a variant to set its literal.
//!
//! ```ignore
//! #[derive(OptEnum)]
//! enum Mode {
//!     Fast,
//!     #[opt(name = "thorough")]
//!     Slow,
//! }
//! ```
pub use optbind_derive::*;
