use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Token conventions of the data file format
// ---------------------------------------------------------------------------

/// An opening/closing character pair that may wrap a series name,
/// e.g. `"Sensor A"` or `[Sensor A]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePair {
    pub open: char,
    pub close: char,
}

/// Characters the tokenizer treats specially.
///
/// Whitespace always separates tokens; everything here is on top of that.
/// Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Extra token separators besides whitespace.
    pub delimiters: Vec<char>,
    /// Quote pairs accepted around a name (never around numbers).
    pub quotes: Vec<QuotePair>,
    /// Starts a comment when it begins a token.
    pub comment: Option<char>,
    /// Accept `nan` / `inf` coordinates.
    pub allow_non_finite: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiters: vec![','],
            quotes: vec![QuotePair {
                open: '"',
                close: '"',
            }],
            comment: Some('#'),
            allow_non_finite: false,
        }
    }
}

impl ParserConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ParserConfig =
            serde_json::from_str(&text).map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::debug!("Loaded parser config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Reject configurations under which tokens would be ambiguous.
    pub fn validate(&self) -> Result<()> {
        for &d in &self.delimiters {
            if self.can_appear_in_number(d) {
                return Err(Error::InvalidConfig(format!(
                    "delimiter '{d}' can appear inside a number"
                )));
            }
        }
        for q in &self.quotes {
            for c in [q.open, q.close] {
                if self.is_delimiter(c) {
                    return Err(Error::InvalidConfig(format!(
                        "quote character '{c}' is also a delimiter"
                    )));
                }
            }
        }
        if let Some(c) = self.comment {
            if self.is_delimiter(c) {
                return Err(Error::InvalidConfig(format!(
                    "comment character '{c}' is also a delimiter"
                )));
            }
            if self.can_start_number(c) {
                return Err(Error::InvalidConfig(format!(
                    "comment character '{c}' can start a number"
                )));
            }
            if self.quotes.iter().any(|q| q.open == c) {
                return Err(Error::InvalidConfig(format!(
                    "comment character '{c}' is also an opening quote"
                )));
            }
        }
        Ok(())
    }

    /// Characters `f64` parsing accepts anywhere in a coordinate token.
    fn can_appear_in_number(&self, c: char) -> bool {
        c.is_ascii_digit()
            || matches!(c, '.' | '+' | '-' | 'e' | 'E')
            || (self.allow_non_finite && "infinitynan".contains(c.to_ascii_lowercase()))
    }

    /// Characters a coordinate token can begin with.
    fn can_start_number(&self, c: char) -> bool {
        c.is_ascii_digit()
            || matches!(c, '.' | '+' | '-')
            || (self.allow_non_finite && matches!(c.to_ascii_lowercase(), 'i' | 'n'))
    }

    /// Whitespace or one of the configured delimiters.
    pub fn is_delimiter(&self, c: char) -> bool {
        c.is_whitespace() || self.delimiters.contains(&c)
    }

    /// The quote pair opened by `c`, if any.
    pub fn quote_opened_by(&self, c: char) -> Option<QuotePair> {
        self.quotes.iter().copied().find(|q| q.open == c)
    }
}
