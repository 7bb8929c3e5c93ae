//! PostgreSQL dialect.

use crate::ast::{Chain, Token, TokenId, TokenKind};
use crate::dialect::{Dialect, log_escape_failure, rewrite_value, token_at, unhandled};
use crate::error::SqlResult;
use crate::escape::{PgEscape, PgLocalEscaper};

/// PostgreSQL: every identifier is quoted and every string literal escaped
/// through the connection's escape primitives.
#[derive(Debug, Clone, Default)]
pub struct PostgresDialect<E = PgLocalEscaper> {
    escaper: E,
}

impl PostgresDialect {
    /// PostgreSQL dialect with client-side escaping.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: PgEscape> PostgresDialect<E> {
    /// PostgreSQL dialect escaping through a live connection.
    pub fn with_escaper(escaper: E) -> Self {
        Self { escaper }
    }

    pub fn escaper(&self) -> &E {
        &self.escaper
    }
}

impl<E: PgEscape> Dialect for PostgresDialect<E> {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn escape_value(&self, value: &str) -> SqlResult<String> {
        self.escaper
            .escape_literal(value)
            .inspect_err(|err| log_escape_failure(self.name(), err))
    }

    fn escape_identifier(&self, name: &str) -> SqlResult<String> {
        self.escaper
            .escape_identifier(name)
            .inspect_err(|err| log_escape_failure(self.name(), err))
    }

    fn should_transform(&self, token: &Token) -> bool {
        matches!(
            token.kind(),
            TokenKind::Identifier | TokenKind::QuotedIdentifier | TokenKind::String
        )
    }

    fn transform(&self, chain: &mut Chain, id: TokenId) -> SqlResult<TokenId> {
        let token = token_at(chain, id)?;
        let escaped = match token.kind() {
            TokenKind::Identifier | TokenKind::QuotedIdentifier => {
                self.escape_identifier(token.value())?
            }
            TokenKind::String => self.escape_value(token.value())?,
            kind => return Err(unhandled(self.name(), kind)),
        };
        rewrite_value(chain, id, escaped)
    }
}
