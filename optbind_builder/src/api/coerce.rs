use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::api::resource::Resources;
use crate::model::TypeTag;

/// Behaviour to coerce a list of Cli tokens into the type `Self`.
///
/// This is the capability every bindable field type must provide.
/// `optbind` implements it for `bool`, `i32`, `i16`, `f64`, `String`, `Vec<T>`, `Box<[T]>`, `Option<T>`,
/// [`Input`](crate::Input), [`Seeded`](crate::Seeded), and a handful of `FromStr` types.
/// Enumerated constants get an implementation via `#[derive(OptEnum)]` (or [`coerce_enum!`](crate::coerce_enum)),
/// and any other `FromStr` type via [`coerce_from_str!`](crate::coerce_from_str).
pub trait Coerce: Sized {
    /// Whether `+name` (append mode) applies to this type.
    const APPENDABLE: bool = false;

    /// The tag used to document this type.
    fn type_tag() -> TypeTag;

    /// Coerce the tokens of a single option occurrence.
    ///
    /// `Ok(None)` is a legitimate "no value" result (ex: an enum given no token), which is distinct from an error.
    fn coerce(tokens: &[String], resources: &Resources) -> Result<Option<Self>, CoerceError>;

    /// Render the current value for display.
    fn render(&self) -> String;

    /// The valid literals, for enumerated types.
    fn choices() -> Vec<&'static str> {
        Vec::default()
    }

    /// Merge a newly coerced value into this one (append mode).
    fn append(&mut self, _other: Self) -> Result<(), CoerceError> {
        Err(CoerceError::AppendUnsupported(Self::type_tag()))
    }
}

/// The ways a list of tokens fails to coerce.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoerceError {
    /// The option received the wrong number of tokens.
    #[error("{expected} argument(s) required, but got {provided}.")]
    ArgCountMismatch {
        /// The accepted arity.
        expected: &'static str,
        /// The number of tokens received.
        provided: usize,
    },

    /// A token is not a valid literal of the type.
    #[error("cannot convert '{token}' to {type_name}.")]
    InvalidLiteral {
        /// The offending token.
        token: String,
        /// The target type.
        type_name: &'static str,
    },

    /// A token does not name any of the enumerated literals.
    #[error("invalid choice '{token}'; valid choices: {choices}.")]
    InvalidChoice {
        /// The offending token.
        token: String,
        /// The valid literals, pipe separated.
        choices: String,
    },

    /// The opaque type could not be constructed from the joined tokens.
    #[error("failed to construct {type_name}: {message}.")]
    ConstructionFailure {
        /// The target type.
        type_name: &'static str,
        /// The construction error.
        message: String,
    },

    /// The resource could not be opened (strict resource policy only).
    #[error("couldn't open '{path}': {message}.")]
    ResourceOpenFailure {
        /// The path of the resource.
        path: String,
        /// The io error.
        message: String,
    },

    /// Append mode was requested on a type that does not accumulate.
    #[error("append (+) is not supported for '{0}' options.")]
    AppendUnsupported(TypeTag),
}

/// Take precisely one token.
pub(crate) fn single(tokens: &[String]) -> Result<&str, CoerceError> {
    match tokens {
        [token] => Ok(token.as_str()),
        _ => Err(CoerceError::ArgCountMismatch {
            expected: "1",
            provided: tokens.len(),
        }),
    }
}

/// Construct an opaque type `T` from the tokens joined by spaces.
pub fn construct<T>(tokens: &[String]) -> Result<T, CoerceError>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    T::from_str(&tokens.join(" ")).map_err(|error| CoerceError::ConstructionFailure {
        type_name: std::any::type_name::<T>(),
        message: error.to_string(),
    })
}

/// Behaviour for enumerated constants selectable by (case-insensitive) literal.
///
/// Typically implemented via `#[derive(OptEnum)]`.
pub trait OptEnum: Sized {
    /// The literal of each variant, in declaration order.
    fn literals() -> &'static [&'static str];

    /// The variant at `index` of [`OptEnum::literals`].
    fn from_literal_index(index: usize) -> Self;

    /// The literal of this variant.
    fn literal(&self) -> &'static str;
}

/// Coerce an enumerated constant: no token is "no value", one token is matched case-insensitively.
pub fn coerce_choice<E: OptEnum>(tokens: &[String]) -> Result<Option<E>, CoerceError> {
    match tokens {
        [] => Ok(None),
        [token] => {
            let lowered = token.to_lowercase();
            match E::literals()
                .iter()
                .position(|literal| literal.to_lowercase() == lowered)
            {
                Some(index) => Ok(Some(E::from_literal_index(index))),
                None => Err(CoerceError::InvalidChoice {
                    token: token.clone(),
                    choices: E::literals().join("|"),
                }),
            }
        }
        _ => Err(CoerceError::ArgCountMismatch {
            expected: "0 or 1",
            provided: tokens.len(),
        }),
    }
}

/// Implement [`Coerce`] for enumerated types which implement [`OptEnum`].
///
/// `#[derive(OptEnum)]` invokes this already.
#[macro_export]
macro_rules! coerce_enum {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::Coerce for $t {
                fn type_tag() -> $crate::TypeTag {
                    $crate::TypeTag::Enum
                }

                fn coerce(
                    tokens: &[::std::string::String],
                    _resources: &$crate::Resources,
                ) -> ::std::result::Result<::std::option::Option<Self>, $crate::CoerceError> {
                    $crate::coerce_choice::<Self>(tokens)
                }

                fn render(&self) -> ::std::string::String {
                    ::std::string::ToString::to_string($crate::OptEnum::literal(self))
                }

                fn choices() -> ::std::vec::Vec<&'static str> {
                    <Self as $crate::OptEnum>::literals().to_vec()
                }
            }
        )+
    };
}

/// Implement [`Coerce`] for opaque types which construct via [`FromStr`] and render via [`std::fmt::Display`].
///
/// The tokens of an occurrence are joined by spaces and handed to `FromStr`.
///
/// ### Example
/// ```
/// # use optbind_builder as optbind;
/// use optbind::{coerce_from_str, Coerce, TypeTag};
/// use std::str::FromStr;
///
/// struct Point(i32, i32);
///
/// impl FromStr for Point {
///     type Err = String;
///
///     fn from_str(s: &str) -> Result<Self, Self::Err> {
///         let (x, y) = s.split_once(',').ok_or("expected 'x,y'")?;
///         Ok(Point(
///             x.trim().parse().map_err(|_| "bad x")?,
///             y.trim().parse().map_err(|_| "bad y")?,
///         ))
///     }
/// }
///
/// impl std::fmt::Display for Point {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{},{}", self.0, self.1)
///     }
/// }
///
/// coerce_from_str!(Point);
///
/// assert_eq!(Point::type_tag(), TypeTag::Unknown);
/// ```
#[macro_export]
macro_rules! coerce_from_str {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::Coerce for $t {
                fn type_tag() -> $crate::TypeTag {
                    $crate::TypeTag::Unknown
                }

                fn coerce(
                    tokens: &[::std::string::String],
                    _resources: &$crate::Resources,
                ) -> ::std::result::Result<::std::option::Option<Self>, $crate::CoerceError> {
                    $crate::construct::<Self>(tokens).map(::std::option::Option::Some)
                }

                fn render(&self) -> ::std::string::String {
                    ::std::string::ToString::to_string(self)
                }
            }
        )+
    };
}

coerce_from_str!(i64, u8, u16, u32, u64, usize, f32, char);

impl Coerce for bool {
    fn type_tag() -> TypeTag {
        TypeTag::Bool
    }

    fn coerce(tokens: &[String], _resources: &Resources) -> Result<Option<Self>, CoerceError> {
        match tokens {
            [] => Ok(Some(true)),
            [token] => match token.to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(CoerceError::InvalidLiteral {
                    token: token.clone(),
                    type_name: "bool",
                }),
            },
            _ => Err(CoerceError::ArgCountMismatch {
                expected: "0 or 1",
                provided: tokens.len(),
            }),
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

macro_rules! coerce_integer {
    ($t:ty, $tag:expr, $name:literal) => {
        impl Coerce for $t {
            fn type_tag() -> TypeTag {
                $tag
            }

            fn coerce(
                tokens: &[String],
                _resources: &Resources,
            ) -> Result<Option<Self>, CoerceError> {
                let token = single(tokens)?;
                let value = match token {
                    "MAX" => <$t>::MAX,
                    "MIN" => <$t>::MIN,
                    _ => token.parse::<$t>().map_err(|_| CoerceError::InvalidLiteral {
                        token: token.to_string(),
                        type_name: $name,
                    })?,
                };
                Ok(Some(value))
            }

            fn render(&self) -> String {
                self.to_string()
            }
        }
    };
}

coerce_integer!(i32, TypeTag::Int, "int");
coerce_integer!(i16, TypeTag::Short, "shrt");

impl Coerce for f64 {
    fn type_tag() -> TypeTag {
        TypeTag::Double
    }

    fn coerce(tokens: &[String], _resources: &Resources) -> Result<Option<Self>, CoerceError> {
        let token = single(tokens)?;
        let value = match token {
            "MAX" => f64::INFINITY,
            "MIN" => f64::NEG_INFINITY,
            _ => token.parse::<f64>().map_err(|_| CoerceError::InvalidLiteral {
                token: token.to_string(),
                type_name: "dbl",
            })?,
        };
        Ok(Some(value))
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl Coerce for String {
    const APPENDABLE: bool = true;

    fn type_tag() -> TypeTag {
        TypeTag::Str
    }

    fn coerce(tokens: &[String], _resources: &Resources) -> Result<Option<Self>, CoerceError> {
        Ok(Some(tokens.join(" ")))
    }

    fn render(&self) -> String {
        self.clone()
    }

    fn append(&mut self, other: Self) -> Result<(), CoerceError> {
        if self.is_empty() {
            *self = other;
        } else {
            self.push(' ');
            self.push_str(&other);
        }

        Ok(())
    }
}

impl Coerce for PathBuf {
    fn type_tag() -> TypeTag {
        TypeTag::Unknown
    }

    fn coerce(tokens: &[String], _resources: &Resources) -> Result<Option<Self>, CoerceError> {
        construct(tokens).map(Some)
    }

    fn render(&self) -> String {
        self.display().to_string()
    }
}

// Each token is coerced on its own, in order.
// Elements that coerce to "no value" are skipped, so positions only line up with the tokens
// when every element binds; an element type of `Option<T>` keeps them aligned.
fn coerce_each<T: Coerce>(tokens: &[String], resources: &Resources) -> Result<Vec<T>, CoerceError> {
    let mut values = Vec::with_capacity(tokens.len());

    for token in tokens {
        if let Some(value) = T::coerce(std::slice::from_ref(token), resources)? {
            values.push(value);
        }
    }

    Ok(values)
}

fn render_each<T: Coerce>(values: &[T]) -> String {
    values
        .iter()
        .map(Coerce::render)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A list: replaced by `-name`, extended by `+name`.
///
/// Tokens whose element coerces to "no value" (ex: a resource which failed to open) are left out.
/// Use `Vec<Option<T>>` to keep one element per token.
impl<T: Coerce> Coerce for Vec<T> {
    const APPENDABLE: bool = true;

    fn type_tag() -> TypeTag {
        TypeTag::Many(Box::new(T::type_tag()))
    }

    fn coerce(tokens: &[String], resources: &Resources) -> Result<Option<Self>, CoerceError> {
        coerce_each(tokens, resources).map(Some)
    }

    fn render(&self) -> String {
        render_each(self)
    }

    fn append(&mut self, other: Self) -> Result<(), CoerceError> {
        self.extend(other);
        Ok(())
    }
}

/// An array: always replaced.
///
/// As with `Vec<T>`, elements with "no value" are left out; use `Box<[Option<T>]>` to keep positions.
impl<T: Coerce> Coerce for Box<[T]> {
    fn type_tag() -> TypeTag {
        TypeTag::Many(Box::new(T::type_tag()))
    }

    fn coerce(tokens: &[String], resources: &Resources) -> Result<Option<Self>, CoerceError> {
        coerce_each(tokens, resources).map(|values| Some(values.into_boxed_slice()))
    }

    fn render(&self) -> String {
        render_each(self)
    }
}

/// A nullable `T`: the "no value" result of `T` binds `None`.
impl<T: Coerce> Coerce for Option<T> {
    const APPENDABLE: bool = T::APPENDABLE;

    fn type_tag() -> TypeTag {
        T::type_tag()
    }

    fn coerce(tokens: &[String], resources: &Resources) -> Result<Option<Self>, CoerceError> {
        T::coerce(tokens, resources).map(Some)
    }

    fn render(&self) -> String {
        match self {
            Some(value) => value.render(),
            None => String::default(),
        }
    }

    fn choices() -> Vec<&'static str> {
        T::choices()
    }

    fn append(&mut self, other: Self) -> Result<(), CoerceError> {
        match other {
            None => Ok(()),
            Some(value) => match self {
                Some(existing) => existing.append(value),
                None => {
                    *self = Some(value);
                    Ok(())
                }
            },
        }
    }
}
