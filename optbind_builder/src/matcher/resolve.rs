/// The lower-cased names each option may be referred to by, in registration order.
#[derive(Debug, Default)]
pub(crate) struct NameIndex {
    // (full name, bare name)
    entries: Vec<(String, String)>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum MatchError {
    Unknown,
    Ambiguous(Vec<usize>),
}

/// The options which a key matches, by index into the [`NameIndex`].
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Resolution {
    complete: Vec<usize>,
    partial: Vec<usize>,
}

impl NameIndex {
    pub(crate) fn new<'n>(names: impl IntoIterator<Item = (&'n str, &'n str)>) -> Self {
        Self {
            entries: names
                .into_iter()
                .map(|(full_name, name)| (full_name.to_lowercase(), name.to_lowercase()))
                .collect(),
        }
    }

    /// Find the options named by `key` (which must already be lower-cased).
    ///
    /// Both sets are deduplicated, in registration order.
    pub(crate) fn resolve(&self, key: &str, full_name_only: bool) -> Resolution {
        let mut resolution = Resolution::default();

        for (index, (full_name, name)) in self.entries.iter().enumerate() {
            let mut candidates = vec![full_name];

            if !full_name_only {
                candidates.push(name);
            }

            if candidates.iter().any(|candidate| *candidate == key) {
                resolution.complete.push(index);
            }

            if candidates.iter().any(|candidate| candidate.starts_with(key)) {
                resolution.partial.push(index);
            }
        }

        resolution
    }
}

impl Resolution {
    /// Choose the options to bind.
    ///
    /// Multi-match binds every partial match.
    /// Otherwise a unique complete match wins, then a unique partial match.
    pub(crate) fn select(self, multi: bool) -> Result<Vec<usize>, MatchError> {
        let Resolution { complete, partial } = self;

        if partial.is_empty() {
            return Err(MatchError::Unknown);
        }

        if multi {
            return Ok(partial);
        }

        match (complete.len(), partial.len()) {
            (1, _) => Ok(complete),
            (0, 1) => Ok(partial),
            _ => Err(MatchError::Ambiguous(partial)),
        }
    }
}
