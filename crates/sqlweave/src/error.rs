//! Error types for sqlweave

use crate::ast::TokenKind;
use thiserror::Error;

/// Result type alias for sqlweave operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while lexing, assembling, or rendering statements.
///
/// The type is `Clone` so statement builders can hold on to the first construction
/// error and hand it back from [`Operation::operation_token`](crate::Operation::operation_token).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// A lexical unit did not match any known category.
    #[error("Unrecognized token '{unit}' at byte {position}")]
    UnrecognizedToken { unit: String, position: usize },

    /// A dialect asked to transform a token kind it has no rewrite for.
    #[error("Dialect {dialect} cannot transform {kind} tokens")]
    UnhandledTokenKind {
        dialect: &'static str,
        kind: TokenKind,
    },

    /// The connection's escape/quote primitive reported an error.
    #[error("Escape primitive failed: {0}")]
    EscapeFailure(String),

    /// A cycle or dangling link was found while walking a chain.
    #[error("Malformed token chain: {0}")]
    MalformedChain(String),

    /// A predicate after the first one was added without AND/OR.
    #[error("Missing AND/OR connective in {clause} clause")]
    MissingConnective { clause: &'static str },

    /// An INSERT tuple does not match the declared column list.
    #[error("Row {row} has {values} values but {columns} columns were declared")]
    ArityMismatch {
        row: usize,
        columns: usize,
        values: usize,
    },

    /// An INSERT was given both VALUES rows and a SELECT source.
    #[error("INSERT takes either VALUES rows or a SELECT source, not both")]
    ConflictingInsertSource,

    /// A float argument was NaN or infinite.
    #[error("Non-finite number {0} has no SQL literal")]
    NonFiniteNumber(String),

    /// An identifier passed to a builder failed validation.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl SqlError {
    /// Create an escape failure error
    pub fn escape(message: impl Into<String>) -> Self {
        Self::EscapeFailure(message.into())
    }

    /// Create a malformed chain error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedChain(message.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Check if this is an unrecognized token error
    pub fn is_unrecognized_token(&self) -> bool {
        matches!(self, Self::UnrecognizedToken { .. })
    }

    /// Check if this is an escape failure
    pub fn is_escape_failure(&self) -> bool {
        matches!(self, Self::EscapeFailure(_))
    }

    /// Check if this is a malformed chain error
    pub fn is_malformed_chain(&self) -> bool {
        matches!(self, Self::MalformedChain(_))
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for SqlError {
    fn from(err: tokio_postgres::Error) -> Self {
        match err.as_db_error() {
            Some(db_err) => Self::EscapeFailure(format!(
                "{}: {}",
                db_err.code().code(),
                db_err.message()
            )),
            None => Self::EscapeFailure(err.to_string()),
        }
    }
}
