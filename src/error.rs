use std::fmt;
use std::io;
use thiserror::Error;

/// A malformed vector or test file. `line` is 1-based.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    MissingWord,
    BadComponent(String),
    ZeroDimensions,
    DimensionMismatch { word: String, expected: usize, got: usize },
    DuplicateWord(String),
    Empty,
    FieldCount(usize),
    EmptyAlternative,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWord => write!(f, "row has no word token"),
            Self::BadComponent(s) => write!(f, "vector component '{s}' is not a number"),
            Self::ZeroDimensions => write!(f, "first vector has zero dimensions"),
            Self::DimensionMismatch { word, expected, got } => write!(
                f,
                "vector for '{word}' has dimension {got} which differs from initial dimension {expected}"
            ),
            Self::DuplicateWord(w) => write!(f, "word '{w}' appears more than once"),
            Self::Empty => write!(f, "no word vectors found"),
            Self::FieldCount(n) => write!(f, "expected 2 fields, found {n}"),
            Self::EmptyAlternative => write!(f, "empty alternative in '/'-separated answer"),
        }
    }
}

impl ParseError {
    pub(crate) fn new(line: usize, kind: ParseErrorKind) -> Self {
        ParseError { line, kind }
    }
}

/// A word looked up where the caller guarantees it is present.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{word}' not found in {within}")]
pub struct NotFoundError {
    pub word: String,
    pub within: &'static str,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

pub type Result<T> = std::result::Result<T, Error>;
