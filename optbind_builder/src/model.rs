/// The type tag of an option, as displayed in the help message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    /// `bool`
    Bool,
    /// `int`: 32 bit signed integer.
    Int,
    /// `shrt`: 16 bit signed integer.
    Short,
    /// `dbl`: 64 bit float.
    Double,
    /// `str`
    Str,
    /// `enum`: an enumerated constant.
    Enum,
    /// `read`: a readable resource handle.
    Read,
    /// `rand`: a seeded random source.
    Rand,
    /// `T*`: an array or list of the inner tag.
    Many(Box<TypeTag>),
    /// `unk`: an opaque type constructed from a string.
    Unknown,
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::Int => write!(f, "int"),
            TypeTag::Short => write!(f, "shrt"),
            TypeTag::Double => write!(f, "dbl"),
            TypeTag::Str => write!(f, "str"),
            TypeTag::Enum => write!(f, "enum"),
            TypeTag::Read => write!(f, "read"),
            TypeTag::Rand => write!(f, "rand"),
            TypeTag::Many(inner) => write!(f, "{inner}*"),
            TypeTag::Unknown => write!(f, "unk"),
        }
    }
}
