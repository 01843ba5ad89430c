use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{ParameterError, ParameterInput};

/// Marker that ends the parameter section of an input file.
const PAR_END: &str = "par_end";

/// Errors that can occur while building an [`InputFile`].
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input file `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: parameter appears before any `<block>` header")]
    MissingBlock { line: usize },

    #[error("line {line}: block header has an empty name")]
    EmptyBlockName { line: usize },

    #[error("line {line}: expected `name = value`, found `{content}`")]
    MalformedLine { line: usize, content: String },

    #[error("override `{0}` must have the form `block/name=value`")]
    MalformedOverride(String),

    #[error("`{block}/{name} = {value}` cannot be written back as an input-file line")]
    Unrepresentable {
        block: String,
        name: String,
        value: String,
    },
}

/// An in-memory parameter store using the host's input-file layout.
///
/// ```text
/// <problem>
/// alpha    = 0.02   # expansion rate
/// omega    = 1.0
///
/// <hydro>
/// gamma    = 1.4
/// ```
///
/// Parsing stops at a `<par_end>` header, if present.
/// Values are kept as text and only interpreted when looked up, so a file may
/// carry parameters meant for other parts of the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFile {
    blocks: BTreeMap<String, BTreeMap<String, String>>,
}

impl InputFile {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses input-file text.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending line if a parameter
    /// appears outside a block, a header is empty, or a line is not of the
    /// form `name = value`.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let mut input = Self::new();
        let mut current: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = strip_comment(raw).trim();
            if content.is_empty() {
                continue;
            }

            if let Some(header) = content.strip_prefix('<') {
                let name = header.trim_end_matches('>').trim();
                if name.is_empty() {
                    return Err(InputError::EmptyBlockName { line });
                }
                if name == PAR_END {
                    break;
                }
                input.blocks.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }

            let Some(block) = current.as_deref() else {
                return Err(InputError::MissingBlock { line });
            };

            match content.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
                    input.insert(block, name.trim(), value.trim());
                }
                _ => {
                    return Err(InputError::MalformedLine {
                        line,
                        content: content.to_string(),
                    });
                }
            }
        }

        Ok(input)
    }

    /// Reads and parses an input file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to parse.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Sets `block/name` to `value`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry would not survive being displayed and
    /// parsed again: an empty or padded part, a `#` or line break anywhere,
    /// an `=` in the name, or angle brackets in the block name.
    pub fn set(&mut self, block: &str, name: &str, value: &str) -> Result<(), InputError> {
        let padded = |part: &str| part.is_empty() || part.trim() != part;
        let breaks = |part: &str| part.contains(['#', '\n', '\r']);

        if [block, name, value].into_iter().any(|part| padded(part) || breaks(part))
            || name.contains('=')
            || name.starts_with('<')
            || block.contains(['<', '>'])
        {
            return Err(InputError::Unrepresentable {
                block: block.to_string(),
                name: name.to_string(),
                value: value.to_string(),
            });
        }

        self.insert(block, name, value);
        Ok(())
    }

    fn insert(&mut self, block: &str, name: &str, value: impl Into<String>) {
        self.blocks
            .entry(block.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
    }

    /// Returns the raw text stored at `block/name`.
    #[must_use]
    pub fn get(&self, block: &str, name: &str) -> Option<&str> {
        self.blocks.get(block)?.get(name).map(String::as_str)
    }

    /// Applies a command-line style override such as `problem/alpha=0.02`.
    ///
    /// # Errors
    ///
    /// Returns an error if the override is not of the form `block/name=value`,
    /// or if [`InputFile::set`] rejects it.
    pub fn apply_override(&mut self, entry: &str) -> Result<(), InputError> {
        let malformed = || InputError::MalformedOverride(entry.to_string());

        let (key, value) = entry.split_once('=').ok_or_else(malformed)?;
        let (block, name) = key.split_once('/').ok_or_else(malformed)?;
        let (block, name, value) = (block.trim(), name.trim(), value.trim());
        if block.is_empty() || name.is_empty() || value.is_empty() {
            return Err(malformed());
        }

        self.set(block, name, value)
    }

    /// Returns `true` if no parameters are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.values().all(BTreeMap::is_empty)
    }
}

impl ParameterInput for InputFile {
    fn get_or_add_real(
        &mut self,
        block: &str,
        name: &str,
        default: f64,
    ) -> Result<f64, ParameterError> {
        match self.get(block, name) {
            Some(value) => value.parse().map_err(|_| ParameterError::NotAReal {
                block: block.to_string(),
                name: name.to_string(),
                value: value.to_string(),
            }),
            None => {
                self.insert(block, name, default.to_string());
                Ok(default)
            }
        }
    }
}

/// Renders the store in input-file layout, blocks and names sorted.
impl fmt::Display for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (block, params) in &self.blocks {
            if !first {
                writeln!(f)?;
            }
            first = false;

            writeln!(f, "<{block}>")?;
            let width = params.keys().map(String::len).max().unwrap_or(0);
            for (name, value) in params {
                writeln!(f, "{name:<width$} = {value}")?;
            }
        }
        Ok(())
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(content, _)| content)
}
