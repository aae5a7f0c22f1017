use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::parser::base::OptionDescriptor;
use crate::parser::interface::UserInterface;

#[derive(Debug)]
pub(crate) struct Printer {
    terminal_width: Option<usize>,
}

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_TAIL_WIDTH: usize = 17;

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(None)
    }

    pub(crate) fn terminal() -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(terminal_width)
    }

    pub(crate) fn new(terminal_width: Option<usize>) -> Self {
        Self { terminal_width }
    }

    pub(crate) fn print_help(
        &self,
        descriptors: &[OptionDescriptor<'_>],
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        user_interface.print(USAGE_HEADER.to_string());

        for descriptor in descriptors {
            for line in self.wrap(descriptor) {
                user_interface.print(line);
            }
        }
    }

    pub(crate) fn print_summary(
        &self,
        descriptors: &[OptionDescriptor<'_>],
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        user_interface.print(SUMMARY_HEADER.to_string());

        for descriptor in descriptors.iter().filter(|d| d.specified()) {
            user_interface.print(format!("{:LINE_INDENT$}{}", "", descriptor.short_string()));
        }
    }

    // Lines wider than the terminal keep the aligned head, and wrap the tail beside it.
    fn wrap(&self, descriptor: &OptionDescriptor<'_>) -> Vec<String> {
        let (head, tail) = descriptor.help_columns();
        let head_width = head.chars().count();

        match self.terminal_width {
            Some(width) if LINE_INDENT + head_width + tail.chars().count() > width => {
                let hanging = LINE_INDENT + head_width + 1;
                let tail_width =
                    std::cmp::max(width.saturating_sub(hanging), MINIMUM_TAIL_WIDTH);

                chunk(&tail, tail_width)
                    .into_iter()
                    .enumerate()
                    .map(|(i, part)| {
                        if i == 0 {
                            format!("{:LINE_INDENT$}{head} {part}", "")
                        } else {
                            format!("{:hanging$}{part}", "")
                        }
                    })
                    .collect()
            }
            _ => vec![format!("{:LINE_INDENT$}{head}{tail}", "")],
        }
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// Words longer than the width are split with a trailing hyphen.
fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

/// Where in the input tokens a parse error occurred.
///
/// Displays the tokens with a caret beneath the offending character.
#[derive(Debug, PartialEq, Eq)]
pub struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens_length = 0;
        let mut projection = String::default();
        let mut projection_offset = 0;

        for (i, token) in self.tokens.iter().enumerate() {
            tokens_length += token.len();
            projection.push_str(token);

            if i + 1 < self.tokens.len() {
                projection.push(' ');

                if tokens_length <= self.offset {
                    projection_offset += 1;
                }
            }
        }

        write!(
            f,
            "{projection}\n{:width$}^",
            "",
            width = std::cmp::min(self.offset, tokens_length.saturating_sub(1)) + projection_offset
        )
    }
}
