use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ParseError – a malformed token somewhere in the input
// ---------------------------------------------------------------------------

/// What went wrong while parsing a line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("expected a series name")]
    MissingName,
    #[error("series name is empty")]
    EmptyName,
    #[error("unterminated name, expected closing '{0}'")]
    UnterminatedName(char),
    #[error("unexpected '{0}' after closing quote")]
    TrailingAfterName(char),
    #[error("expected a number")]
    MissingNumber,
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("'{0}' is not a finite number")]
    NonFiniteNumber(String),
    #[error("x coordinate has no matching y coordinate")]
    UnpairedCoordinate,
    #[error("series '{0}' has no coordinates")]
    MissingCoordinates(String),
}

/// A parse failure with its 1-based line and character column.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, column: usize, kind: ParseErrorKind) -> Self {
        Self { line, column, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.column, self.kind)
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Error – everything the library can fail with
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read data file \"{}\": {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO Error {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse Error at {0}")]
    Parse(#[from] ParseError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),
    #[error("Cannot load config \"{}\": {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON Error {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV Error {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
