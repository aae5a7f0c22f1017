use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::api::{CoerceError, Resources};
use crate::constant::*;
use crate::matcher::*;
use crate::model::TypeTag;

/// A misconfiguration of the option parser, detected when it is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Two groups were registered under the same name.
    #[error("Config error: group name already exists: '{0}'.")]
    DuplicateGroup(String),

    /// Two options share a full name (`group.name`, compared case-insensitively).
    #[error("Config error: cannot duplicate the option '{0}'.")]
    DuplicateOption(String),
}

/// A failure to parse the input tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// No option matches the marker.
    #[error("Parse error: unknown option '{0}'; -help for usage.")]
    UnknownOption(String),

    /// More than one option matches the marker.
    #[error("Parse error: ambiguous option '{key}'; possible matches:{}", indented(.candidates))]
    AmbiguousOption {
        /// The marker's (lower-cased) key.
        key: String,
        /// The help line of each candidate.
        candidates: Vec<String>,
    },

    /// A token appeared outside of any option.
    #[error("Parse error: argument not part of an option '{0}'.")]
    UnexpectedArgument(String),

    /// The tokens of an option could not be bound to its field.
    #[error("Parse error: invalid value for '{name}': {source}")]
    Binding {
        /// The full name of the option.
        name: String,
        /// The coercion failure.
        #[source]
        source: CoerceError,
    },

    /// Required options were never specified.
    #[error("Parse error: missing required option(s):{}", indented(.0))]
    MissingRequiredOption(Vec<String>),
}

fn indented(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("\n{:LINE_INDENT$}{line}", ""))
        .collect()
}

/// Behaviour to bind the tokens of an option into a field, hiding the field's type.
///
/// We need a (dyn .. [ignoring T] ..) here in order to put all the fields of varying types T under one collection.
pub(crate) trait AnonymousBinding {
    /// Coerce and write the tokens into the field; appending when requested.
    fn bind(
        &mut self,
        tokens: &[String],
        append: bool,
        resources: &Resources,
    ) -> Result<(), CoerceError>;

    fn type_tag(&self) -> TypeTag;

    /// Render the field's current value.
    fn value_string(&self) -> String;

    fn choices(&self) -> Vec<&'static str>;
}


/// One registered option: its documentation, its parse state, and the field it is bound to.
pub struct OptionDescriptor<'a> {
    group: String,
    name: String,
    full_name: String,
    gloss: String,
    required: bool,
    specified: bool,
    string_repn: Option<String>,
    binding: Box<dyn AnonymousBinding + 'a>,
}

impl<'a> std::fmt::Debug for OptionDescriptor<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("full_name", &self.full_name)
            .field("required", &self.required)
            .field("specified", &self.specified)
            .field("string_repn", &self.string_repn)
            .finish()
    }
}

impl<'a> OptionDescriptor<'a> {
    pub(crate) fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        gloss: Option<String>,
        required: bool,
        binding: Box<dyn AnonymousBinding + 'a>,
    ) -> Self {
        let group = group.into();
        let name = name.into();
        let full_name = format!("{group}{GROUP_SEPARATOR}{name}");

        Self {
            group,
            name,
            full_name,
            gloss: gloss.unwrap_or_default(),
            required,
            specified: false,
            string_repn: None,
            binding,
        }
    }

    /// The group (namespace) of this option.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The name of this option, within its group.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `group.name`
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The help text.
    pub fn gloss(&self) -> &str {
        &self.gloss
    }

    /// Whether parsing fails when this option is never specified.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Whether a value has been bound to this option.
    pub fn specified(&self) -> bool {
        self.specified
    }

    /// The textual form of what was bound, as it was given on the command line.
    pub fn string_repn(&self) -> Option<&str> {
        self.string_repn.as_deref()
    }

    /// The type tag of the bound field.
    pub fn type_tag(&self) -> TypeTag {
        self.binding.type_tag()
    }

    /// The current value of the bound field.
    pub fn value_string(&self) -> String {
        self.binding.value_string()
    }

    /// The valid literals, when the bound field is enumerated.
    pub fn choices(&self) -> Vec<&'static str> {
        self.binding.choices()
    }

    /// The line documenting this option in the help message.
    ///
    /// Ex: `group.count                    <  int> *REQUIRED* : how many [0]`
    pub fn help_line(&self) -> String {
        let (head, tail) = self.help_columns();
        format!("{head}{tail}")
    }

    // The aligned name/type head, and the free-form tail.
    pub(crate) fn help_columns(&self) -> (String, String) {
        let head = format!(
            "{:<30} <{:>5}>",
            self.full_name,
            self.type_tag().to_string()
        );
        let mut tail = String::default();

        if self.required {
            tail.push_str(" *REQUIRED*");
        }

        tail.push_str(&format!(" : {} [{}]", self.gloss, self.value_string()));
        let choices = self.choices();

        if !choices.is_empty() {
            tail.push(' ');
            tail.push_str(&choices.join("|"));
        }

        (head, tail)
    }

    /// `group.name = repn`
    pub fn short_string(&self) -> String {
        format!(
            "{}{GROUP_SEPARATOR}{} = {}",
            self.group,
            self.name,
            self.string_repn.as_deref().unwrap_or_default()
        )
    }

    pub(crate) fn set(
        &mut self,
        tokens: &[String],
        append: bool,
        resources: &Resources,
    ) -> Result<(), CoerceError> {
        self.binding.bind(tokens, append, resources)?;
        let joined = tokens.join(" ");
        let repn = if append {
            match self.string_repn.take() {
                Some(previous) => format!("{previous} {joined}"),
                None => joined,
            }
        } else if self.type_tag() == TypeTag::Bool {
            // A bare flag has no tokens; show what it was set to.
            self.binding.value_string()
        } else {
            joined
        };

        debug!(option = %self.full_name, repn = %repn, append, "bound");
        self.string_repn.replace(repn);
        self.specified = true;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ParserConfig {
    pub(crate) ignore_unknown: bool,
    pub(crate) full_name_only: bool,
    pub(crate) relax_required: bool,
    pub(crate) resources: Resources,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Every occurrence was processed.
    /// With unknown options ignored, the failures which did not stop parsing are carried along.
    Complete { swallowed: Vec<(usize, ParseError)> },
    PrintHelp,
}

pub(crate) struct Parser<'a> {
    descriptors: Vec<OptionDescriptor<'a>>,
    index: NameIndex,
    config: ParserConfig,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl<'a> Parser<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default(), ParserConfig::default()).unwrap()
    }

    pub(crate) fn new(
        descriptors: Vec<OptionDescriptor<'a>>,
        config: ParserConfig,
    ) -> Result<Self, ConfigError> {
        let mut full_names = HashSet::new();

        for descriptor in &descriptors {
            if !full_names.insert(descriptor.full_name().to_lowercase()) {
                return Err(ConfigError::DuplicateOption(
                    descriptor.full_name().to_string(),
                ));
            }
        }

        let index = NameIndex::new(
            descriptors
                .iter()
                .map(|descriptor| (descriptor.full_name(), descriptor.name())),
        );

        Ok(Self {
            descriptors,
            index,
            config,
        })
    }

    pub(crate) fn descriptors(&self) -> &[OptionDescriptor<'a>] {
        &self.descriptors
    }

    pub(crate) fn consume(&mut self, tokens: &[&str]) -> Result<Action, (usize, ParseError)> {
        // 1. Scan the tokens into option occurrences.
        // Help anywhere pre-empts binding altogether.
        let events: Vec<Event> = TokenScanner::new(tokens).collect();

        if events.contains(&Event::Help) {
            return Ok(Action::PrintHelp);
        }

        let mut swallowed = Vec::default();

        // 2. Bind each occurrence, in order.
        for event in events {
            let outcome = match event {
                Event::Help => unreachable!("internal error - help must pre-empt binding"),
                Event::Stray { offset, token } => {
                    Err((offset, ParseError::UnexpectedArgument(token)))
                }
                Event::Option(occurrence) => self.bind(occurrence, &mut swallowed),
            };

            if let Err((offset, error)) = outcome {
                match error {
                    ParseError::UnexpectedArgument(_) if self.config.ignore_unknown => {
                        swallowed.push((offset, error));
                    }
                    _ => return Err((offset, error)),
                }
            }
        }

        Ok(Action::Complete { swallowed })
    }

    fn bind(
        &mut self,
        occurrence: Occurrence,
        swallowed: &mut Vec<(usize, ParseError)>,
    ) -> Result<(), (usize, ParseError)> {
        let Occurrence {
            marker,
            offset,
            values,
        } = occurrence;
        let selected = match self
            .index
            .resolve(&marker.key, self.config.full_name_only)
            .select(marker.multi)
        {
            Ok(selected) => selected,
            Err(MatchError::Unknown) if self.config.ignore_unknown => {
                debug!(key = %marker.key, "ignoring unknown option");
                return Ok(());
            }
            Err(MatchError::Unknown) => {
                return Err((offset, ParseError::UnknownOption(marker.key)));
            }
            Err(MatchError::Ambiguous(candidates)) => {
                return Err((
                    offset,
                    ParseError::AmbiguousOption {
                        key: marker.key,
                        candidates: candidates
                            .into_iter()
                            .map(|i| self.descriptors[i].help_line())
                            .collect(),
                    },
                ));
            }
        };

        debug!(key = %marker.key, matches = selected.len(), "resolved option");

        for i in selected {
            let descriptor = &mut self.descriptors[i];

            if let Err(source) = descriptor.set(&values, marker.append, &self.config.resources) {
                let error = ParseError::Binding {
                    name: descriptor.full_name().to_string(),
                    source,
                };

                if self.config.ignore_unknown {
                    swallowed.push((offset, error));
                } else {
                    return Err((offset, error));
                }
            }
        }

        Ok(())
    }

    /// Check every required option was specified.
    pub(crate) fn validate(&self) -> Result<(), ParseError> {
        if self.config.relax_required {
            return Ok(());
        }

        let missing: Vec<String> = self
            .descriptors
            .iter()
            .filter(|descriptor| descriptor.required() && !descriptor.specified())
            .map(OptionDescriptor::help_line)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ParseError::MissingRequiredOption(missing))
        }
    }
}
