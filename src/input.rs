//! Input sources and multi-document YAML decoding.
//!
//! Each input is a stream of `---`-separated YAML documents, as printed by
//! `kubectl get -o yaml` or concatenated manifests. Documents are decoded into
//! [`serde_yaml::Value`] in stream order. Blank documents (a trailing `---`,
//! comment-only sections, an empty input) carry nothing and are skipped; an
//! explicit null such as `~` or `null` is a document like any other and is
//! handed on, where it fails as a non-mapping.

use serde::Deserialize;
use serde_yaml::{Deserializer, Value};
use std::fmt;
use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use crate::constants::{STDIN_ARG, STDIN_NAME};
use crate::core::SaveError;

/// Where a YAML stream is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Interpret a command line argument; `-` selects standard input.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_ARG {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Returns `true` when this source is standard input attached to a terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Stdin) && io::stdin().is_terminal()
    }

    /// Read the whole source into memory.
    pub fn read(&self) -> Result<String, SaveError> {
        let mut input = String::new();
        match self {
            Self::Stdin => {
                io::stdin().lock().read_to_string(&mut input).map_err(|source| SaveError::Io {
                    operation: "read",
                    path: PathBuf::from(STDIN_NAME),
                    source,
                })?;
            }
            Self::File(path) => {
                let mut file = File::open(path).map_err(|source| SaveError::Io {
                    operation: "open",
                    path: path.clone(),
                    source,
                })?;
                file.read_to_string(&mut input).map_err(|source| SaveError::Io {
                    operation: "read",
                    path: path.clone(),
                    source,
                })?;
            }
        }
        Ok(input)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str(STDIN_NAME),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Decode every non-blank document of a YAML stream.
///
/// The iterator stops after the first decode error, which is reported with
/// the 1-based position of the failing document in the stream (blank
/// documents count towards the position).
///
/// # Examples
///
/// ```rust
/// use kubectl_save::input::read_documents;
///
/// let stream = "kind: A\n---\n---\nkind: B\n";
/// let docs: Vec<_> = read_documents(stream).collect::<Result<_, _>>()?;
/// assert_eq!(docs.len(), 2);
/// # Ok::<(), kubectl_save::core::SaveError>(())
/// ```
pub fn read_documents(input: &str) -> Documents<'_> {
    Documents {
        documents: Deserializer::from_str(input),
        raw: Deserializer::from_str(input),
        index: 0,
        done: false,
    }
}

/// Iterator returned by [`read_documents`].
pub struct Documents<'a> {
    documents: Deserializer<'a>,
    // Second pass over the same text, in lockstep, to look at null scalars
    raw: Deserializer<'a>,
    index: usize,
    done: bool,
}

impl Iterator for Documents<'_> {
    type Item = Result<Value, SaveError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(document) = self.documents.next() else {
                self.done = true;
                break;
            };
            let raw = self.raw.next();
            self.index += 1;

            match Value::deserialize(document) {
                Ok(Value::Null) if raw.is_none_or(is_blank) => {
                    tracing::debug!(document = self.index, "skipping blank document");
                }
                Ok(value) => return Some(Ok(value)),
                Err(source) => {
                    self.done = true;
                    return Some(Err(SaveError::YamlDecode {
                        document: self.index,
                        source,
                    }));
                }
            }
        }
        None
    }
}

/// A null document is blank when its scalar has no text at all.
///
/// `~` and `null` keep their spelling; an empty document yields an empty
/// plain scalar, or no event at all for an empty stream.
fn is_blank(document: Deserializer<'_>) -> bool {
    String::deserialize(document).map_or(true, |text| text.is_empty())
}
