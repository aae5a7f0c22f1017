//! `optbind` is a command line option parser for Rust which binds options directly into the fields of your program.
//!
//! It is designed for tools with many typed, optionally grouped, options.
//! Specifically, `optbind` prioritizes the following design concerns:
//! * *Type safe binding*:
//! The user should not call any `&str -> T` conversion functions directly.
//! Each option is bound to a field, and the field's type decides how its tokens are read.
//! * *Grouped options*:
//! Options are declared in named groups, so that many structs may contribute options to one Cli without clashing.
//! * *Forgiving matching*:
//! Options may be abbreviated to any unambiguous prefix, in any letter case.
//! * *Basic UX*:
//! The help and error output is plain text, with one aligned line per option.
//!
//! # Usage
//! via [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/demo_summer_d.rs")]
//! ```
//! or equivalently via builder Api (this page):
//! ```no_run
#![doc = include_str!("../demos/demo_summer_b.rs")]
//! ```
//!
//! Both of these generate the same Cli program:
//! ```console
//! $ summer -help
//! Usage:
//!    summer.items                   < int*> *REQUIRED* : The items to sum. []
//!    summer.verbose                 < bool> : Print every partial sum. [false]
//!
//! $ summer -items 1 2 3
//! Specified options:
//!    summer.items = 1 2 3
//! Sum: 6
//!
//! $ summer -it 1 blah
//! Parse error: invalid value for 'summer.items': cannot convert 'blah' to int.
//! -it 1 blah
//! ^
//! ```
//!
//! # Option Syntax
//! Tokens are read left to right.
//! A token beginning with `-` or `+` (and longer than that one character) is an option *marker*.
//! The tokens after a marker, up to the next marker, are that option's values.
//! ```console
//! Token         | Meaning
//! ----------------------------------------------------------------------------------------
//! -name         | bind the values to the option matching `name`, replacing its value
//! +name         | append the values to the option (lists and strings only)
//! --name        | bind the values to every option matching `name` (ex: a group prefix)
//! -group.name   | match against the full name, rather than the bare name
//! --            | the next token is a value, even if it looks like a marker (ex: `-- -5`)
//! ---           | toggle verbatim mode: every token is a value until the next `---`
//! -help         | print the help message; nothing is bound
//! ```
//!
//! Markers are matched case-insensitively, both to the full name (`group.name`) and the bare name.
//! An exact match wins over prefix matches; otherwise the prefix must match exactly one option.
//! Matching only against full names is configured with [`OptParser::must_match_full_name`].
//!
//! # Builder Api
//! Configure `optbind` by starting with an [`OptParser`] and registering groups of options.
//! Register a [`Group`] via [`OptParser::group`], or a struct which implements [`Options`] via [`OptParser::register`].
//! Each [`Opt`] binds one field, and takes the following aspects:
//! * The field's name on the Cli (required).
//! * A gloss (help text), via [`Opt::gloss`].
//! * Whether it must be specified, via [`Opt::required`].
//!
//! The field's type decides how many tokens it accepts, via the [`Coerce`] trait:
//! ```console
//! Type               | Tag   | Tokens | Notes
//! ---------------------------------------------------------------------------------------------
//! bool               | bool  | 0 or 1 | no token means `true`; otherwise `true`/`false`
//! i32, i16           | int   | 1      | `MAX`/`MIN` select the type's bounds
//! f64                | dbl   | 1      | `MAX`/`MIN` select +/- infinity
//! String             | str   | any    | tokens joined by a space
//! #[derive(OptEnum)] | enum  | 0 or 1 | matched case-insensitively
//! Input              | read  | 1      | a file, or `-` for standard input
//! Seeded             | rand  | 1      | a seeded random source; `0` seeds from entropy
//! Vec<T>, Box<[T]>   | T*    | any    | one element per token
//! Option<T>          | T     | as T   | no value binds `None`
//! ```
//!
//! Other types may be bound by implementing [`Coerce`], or via [`coerce_from_str!`] for types which implement [`std::str::FromStr`].
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
pub mod derive;
pub use optbind_builder::*;
