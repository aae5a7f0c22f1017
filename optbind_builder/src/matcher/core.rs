use crate::constant::*;
use crate::matcher::model::{Event, Marker, Occurrence};

#[derive(Debug, PartialEq, Eq)]
enum Class {
    Escape,
    Toggle,
    Help,
    Marker(Marker),
    Literal,
}

/// Walks the input tokens, producing one [`Event`] per option occurrence (or stray token).
///
/// A lone `--` makes the following token literal, while `---` toggles verbatim mode (all tokens literal).
/// Neither control token is ever collected.
/// Verbatim mode persists across occurrences.
#[derive(Debug)]
pub(crate) struct TokenScanner<'t> {
    tokens: &'t [&'t str],
    position: usize,
    // The character offset of the token at `position`.
    fed: usize,
    verbatim: bool,
    next_verbatim: bool,
    halted: bool,
}

impl<'t> TokenScanner<'t> {
    pub(crate) fn new(tokens: &'t [&'t str]) -> Self {
        Self {
            tokens,
            position: 0,
            fed: 0,
            verbatim: false,
            next_verbatim: false,
            halted: false,
        }
    }

    fn classify(&self, token: &str) -> Class {
        if self.next_verbatim {
            return Class::Literal;
        }

        match token {
            ESCAPE_TOKEN => Class::Escape,
            VERBATIM_TOKEN => Class::Toggle,
            _ if self.verbatim => Class::Literal,
            HELP_TOKEN => Class::Help,
            _ => match Marker::parse(token) {
                Some(marker) => Class::Marker(marker),
                None => Class::Literal,
            },
        }
    }

    fn advance(&mut self, class: &Class) {
        match class {
            Class::Escape => self.next_verbatim = true,
            Class::Toggle => self.verbatim = !self.verbatim,
            Class::Literal => self.next_verbatim = false,
            Class::Help | Class::Marker(_) => {}
        }

        self.fed += self.tokens[self.position].len();
        self.position += 1;
    }
}

impl<'t> Iterator for TokenScanner<'t> {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }

        let tokens = self.tokens;

        loop {
            let token = *tokens.get(self.position)?;
            let offset = self.fed;
            let class = self.classify(token);
            self.advance(&class);

            match class {
                Class::Escape | Class::Toggle => continue,
                Class::Help => {
                    self.halted = true;
                    return Some(Event::Help);
                }
                Class::Literal => {
                    return Some(Event::Stray {
                        offset,
                        token: token.to_string(),
                    });
                }
                Class::Marker(marker) => {
                    let mut values = Vec::default();

                    // Collect greedily, up to the next marker that is live in the current mode.
                    while let Some(value) = tokens.get(self.position) {
                        let class = self.classify(value);

                        if matches!(class, Class::Marker(_) | Class::Help) {
                            break;
                        }

                        self.advance(&class);

                        if class == Class::Literal {
                            values.push(value.to_string());
                        }
                    }

                    return Some(Event::Option(Occurrence {
                        marker,
                        offset,
                        values,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn occurrence(token: &str, offset: usize, values: &[&str]) -> Event {
        Event::Option(Occurrence {
            marker: Marker::parse(token).unwrap(),
            offset,
            values: values.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn scan(tokens: &[&str]) -> Vec<Event> {
        TokenScanner::new(tokens).collect()
    }

    #[test]
    fn scan_empty() {
        assert_eq!(scan(&[]), vec![]);
    }

    #[rstest]
    #[case(vec!["-a"], vec![occurrence("-a", 0, &[])])]
    #[case(vec!["-a", "1"], vec![occurrence("-a", 0, &["1"])])]
    #[case(vec!["-a", "1", "2"], vec![occurrence("-a", 0, &["1", "2"])])]
    #[case(vec!["+a", "1", "-b"], vec![occurrence("+a", 0, &["1"]), occurrence("-b", 3, &[])])]
    #[case(vec!["--a", "x", "--b", "y"], vec![occurrence("--a", 0, &["x"]), occurrence("--b", 4, &["y"])])]
    #[case(vec!["-a", "-", "+"], vec![occurrence("-a", 0, &["-", "+"])])]
    fn scan_markers(#[case] tokens: Vec<&str>, #[case] expected: Vec<Event>) {
        assert_eq!(scan(&tokens), expected);
    }

    #[rstest]
    #[case(vec!["-a", "--", "-5"], vec![occurrence("-a", 0, &["-5"])])]
    #[case(vec!["-a", "--", "--"], vec![occurrence("-a", 0, &["--"])])]
    #[case(vec!["-a", "--", "---", "-b"], vec![occurrence("-a", 0, &["---"]), occurrence("-b", 7, &[])])]
    #[case(vec!["-a", "--", "-help"], vec![occurrence("-a", 0, &["-help"])])]
    #[case(vec!["-a", "--"], vec![occurrence("-a", 0, &[])])]
    fn scan_escape(#[case] tokens: Vec<&str>, #[case] expected: Vec<Event>) {
        assert_eq!(scan(&tokens), expected);
    }

    #[rstest]
    #[case(vec!["-a", "---", "-b", "+c", "---"], vec![occurrence("-a", 0, &["-b", "+c"])])]
    #[case(vec!["-a", "---", "-b", "---", "-c"], vec![occurrence("-a", 0, &["-b"]), occurrence("-c", 10, &[])])]
    #[case(vec!["-a", "---", "-help", "---"], vec![occurrence("-a", 0, &["-help"])])]
    #[case(vec!["-a", "---", "--", "---", "x"], vec![occurrence("-a", 0, &["---", "x"])])]
    #[case(vec!["-a", "---", "-b"], vec![occurrence("-a", 0, &["-b"])])]
    fn scan_verbatim(#[case] tokens: Vec<&str>, #[case] expected: Vec<Event>) {
        assert_eq!(scan(&tokens), expected);
    }

    #[test]
    fn scan_verbatim_persists() {
        // Verbatim mode opened before any marker makes every token a stray.
        assert_eq!(
            scan(&["---", "-a", "b"]),
            vec![
                Event::Stray {
                    offset: 3,
                    token: "-a".to_string(),
                },
                Event::Stray {
                    offset: 5,
                    token: "b".to_string(),
                },
            ]
        );
    }

    #[rstest]
    #[case(vec!["x"], 0, "x")]
    #[case(vec!["--", "-a"], 2, "-a")]
    #[case(vec!["---", "---", "y"], 6, "y")]
    fn scan_stray(#[case] tokens: Vec<&str>, #[case] offset: usize, #[case] token: &str) {
        assert_eq!(
            scan(&tokens),
            vec![Event::Stray {
                offset,
                token: token.to_string(),
            }]
        );
    }

    #[rstest]
    #[case(vec!["-help"], vec![Event::Help])]
    #[case(vec!["-help", "-a", "1"], vec![Event::Help])]
    #[case(vec!["-a", "1", "-help", "-b"], vec![occurrence("-a", 0, &["1"]), Event::Help])]
    #[case(vec!["x", "-help"], vec![Event::Stray { offset: 0, token: "x".to_string() }, Event::Help])]
    fn scan_help(#[case] tokens: Vec<&str>, #[case] expected: Vec<Event>) {
        assert_eq!(scan(&tokens), expected);
    }

    #[test]
    fn scan_help_case_sensitive() {
        // Only the exact help token halts; other spellings are ordinary markers.
        assert_eq!(scan(&["-HELP"]), vec![occurrence("-HELP", 0, &[])]);
        assert_eq!(scan(&["--help"]), vec![occurrence("--help", 0, &[])]);
    }
}
