/// An option marker, such as `-name`, `+name` or `--name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Marker {
    /// The lower-cased name, with every leading `-`/`+` removed.
    pub key: String,
    /// `+name`: accumulate into the existing value.
    pub append: bool,
    /// `--name`: bind every (partially) matching option.
    pub multi: bool,
}

impl Marker {
    /// Interpret `token` as a marker.
    /// A marker starts with `-` or `+` and has at least one more character.
    pub(crate) fn parse(token: &str) -> Option<Self> {
        if token.len() <= 1 || !(token.starts_with('-') || token.starts_with('+')) {
            return None;
        }

        Some(Self {
            key: token
                .trim_start_matches(|c| c == '-' || c == '+')
                .to_lowercase(),
            append: token.starts_with('+'),
            multi: token.starts_with("--"),
        })
    }
}

/// One occurrence of an option marker together with the tokens collected for it.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Occurrence {
    pub marker: Marker,
    /// The character offset of the marker in the token stream.
    pub offset: usize,
    pub values: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Event {
    /// `-help` was encountered; scanning stops.
    Help,
    /// A token which is not part of any option.
    Stray { offset: usize, token: String },
    Option(Occurrence),
}
