use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::api::coerce::{single, Coerce, CoerceError};
use crate::model::TypeTag;

/// The path sentinel which selects standard input.
pub const STDIN_SENTINEL: &str = "-";

/// What to do when a resource option cannot be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenPolicy {
    /// Log the failure and bind no value; parsing continues.
    #[default]
    Lenient,
    /// Fail the binding of the option.
    Strict,
}

/// The character encoding used to decode resource contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8; invalid sequences are an error.
    #[default]
    Utf8,
    /// ISO-8859-1: every byte is one character.
    Latin1,
}

impl Encoding {
    /// Decode `bytes` into a string.
    pub fn decode(&self, bytes: Vec<u8>) -> io::Result<String> {
        match self {
            Encoding::Utf8 => {
                String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            Encoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(Encoding::Latin1),
            _ => Err(format!("unsupported encoding '{s}'")),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "UTF-8"),
            Encoding::Latin1 => write!(f, "ISO-8859-1"),
        }
    }
}

/// How resource options are opened and decoded.
///
/// This is threaded into every coercion, rather than living in global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resources {
    /// Behaviour on open failure.
    pub policy: OpenPolicy,
    /// Encoding applied by [`Input::read_text_line`] and [`Input::read_text`].
    pub encoding: Encoding,
}

/// A readable resource handle: a file, or standard input (`-`).
pub struct Input {
    source: String,
    encoding: Encoding,
    reader: Box<dyn BufRead>,
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("source", &self.source)
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl Input {
    /// Open `source` for reading; [`STDIN_SENTINEL`] selects standard input.
    pub fn open(source: impl Into<String>, encoding: Encoding) -> io::Result<Self> {
        let source = source.into();
        let reader: Box<dyn BufRead> = if source == STDIN_SENTINEL {
            Box::new(BufReader::new(io::stdin()))
        } else {
            Box::new(BufReader::new(File::open(&source)?))
        };

        Ok(Self {
            source,
            encoding,
            reader,
        })
    }

    /// Wrap an already opened reader.
    pub fn from_reader(
        source: impl Into<String>,
        encoding: Encoding,
        reader: impl BufRead + 'static,
    ) -> Self {
        Self {
            source: source.into(),
            encoding,
            reader: Box::new(reader),
        }
    }

    /// The path (or `-`) this input was opened from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The encoding used to decode this input.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Read one decoded line (including its terminator) onto `buffer`.
    /// Returns the number of bytes consumed; `0` at the end of input.
    pub fn read_text_line(&mut self, buffer: &mut String) -> io::Result<usize> {
        let mut bytes = Vec::default();
        let consumed = self.reader.read_until(b'\n', &mut bytes)?;
        buffer.push_str(&self.encoding.decode(bytes)?);
        Ok(consumed)
    }

    /// Read the remainder of the input, decoded.
    pub fn read_text(&mut self) -> io::Result<String> {
        let mut bytes = Vec::default();
        self.reader.read_to_end(&mut bytes)?;
        self.encoding.decode(bytes)
    }
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for Input {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

impl Coerce for Input {
    fn type_tag() -> TypeTag {
        TypeTag::Read
    }

    fn coerce(tokens: &[String], resources: &Resources) -> Result<Option<Self>, CoerceError> {
        let source = single(tokens)?;

        match Input::open(source, resources.encoding) {
            Ok(input) => {
                debug!(source, "opened resource");
                Ok(Some(input))
            }
            Err(error) => match resources.policy {
                OpenPolicy::Lenient => {
                    warn!(source, %error, "couldn't open resource; binding no value");
                    Ok(None)
                }
                OpenPolicy::Strict => Err(CoerceError::ResourceOpenFailure {
                    path: source.to_string(),
                    message: error.to_string(),
                }),
            },
        }
    }

    fn render(&self) -> String {
        self.source.clone()
    }
}
