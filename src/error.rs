//! Error types for the life engine and pattern parsing

use crate::life::Cell;
use thiserror::Error;

/// Errors raised while advancing or measuring the board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Arithmetic around this cell left the representable coordinate range.
    #[error("coordinate overflow around {0}")]
    CoordinateOverflow(Cell),
}

/// Errors raised while converting between pattern text and cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern contains no rows")]
    Empty,
    #[error("invalid character '{ch}' at line {line}, column {column}")]
    InvalidCharacter { ch: char, line: usize, column: usize },
    #[error("pattern row {0} does not fit in a coordinate")]
    TooLarge(usize),
    #[error("pattern bounds {width}x{height} exceed the {limit}-cell plaintext limit")]
    TooSparse { width: u64, height: u64, limit: u64 },
    #[error("unknown built-in pattern '{0}'")]
    UnknownBuiltin(String),
}
