//! Error types for parsing and query operations.

use thiserror::Error;

/// Errors raised while parsing document text.
///
/// Every variant carries the byte offset at which the problem was detected so
/// callers can point at the offending position. A syntax error is terminal:
/// no partial value is ever returned alongside it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// A character that cannot start (or continue) a value at this position.
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    /// The input ended where a value or delimiter was still required.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// A string literal opened at `offset` was never closed.
    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// An object key was not followed by `:`.
    #[error("expected ':' after object key at offset {}, found {}", .offset, describe_found(.found))]
    ExpectedColon { offset: usize, found: Option<char> },

    /// A numeral that could not be converted to an integer or float.
    #[error("invalid number '{literal}' at offset {offset}")]
    NumberFormat { literal: String, offset: usize },

    /// Containers nested deeper than the configured limit.
    #[error("nesting deeper than {limit} levels at offset {offset}")]
    DepthLimitExceeded { limit: usize, offset: usize },

    /// Non-whitespace input after the top-level value (strict mode only).
    #[error("trailing characters after value at offset {offset}")]
    TrailingCharacters { offset: usize },
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{c}'"),
        None => "end of input".to_string(),
    }
}

impl SyntaxError {
    /// Byte offset into the input where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::UnexpectedCharacter { offset, .. }
            | SyntaxError::UnexpectedEnd { offset }
            | SyntaxError::UnterminatedString { offset }
            | SyntaxError::ExpectedColon { offset, .. }
            | SyntaxError::NumberFormat { offset, .. }
            | SyntaxError::DepthLimitExceeded { offset, .. }
            | SyntaxError::TrailingCharacters { offset } => *offset,
        }
    }
}

/// Errors raised by query operators.
///
/// Missing fields are never an error; operators exclude, omit, or skip them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// An ordering comparison between values of incompatible kinds.
    #[error("cannot compare field '{field}' of type {left} with {right}")]
    TypeMismatch {
        field: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("unknown comparison operator: '{0}'")]
    UnknownOperator(String),

    #[error("unknown aggregate function: '{0}'")]
    UnknownAggregate(String),

    /// A value that cannot be viewed as a collection of documents.
    #[error("expected an array of objects, found {0}")]
    NotACollection(&'static str),
}

/// Any error produced by docql-core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("query error: {0}")]
    Query(#[from] QueryError),
}

/// Convenience alias used throughout docql-core.
pub type Result<T, E = Error> = std::result::Result<T, E>;
