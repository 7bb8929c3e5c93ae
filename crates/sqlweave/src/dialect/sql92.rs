//! SQL-92 baseline dialect.

use crate::ast::{Chain, Token, TokenId, TokenKind};
use crate::dialect::{Dialect, rewrite_value, token_at, unhandled};
use crate::error::SqlResult;
use crate::escape::quote_doubling;

/// Standard SQL: string literals use doubled single quotes, identifiers
/// double quotes.
///
/// Only `String` and `QuotedIdentifier` tokens are rewritten during
/// rendering; bare identifiers are left as written.
///
/// The rewrite is single-pass: transforming an already escaped token escapes
/// it again (`O'Brien` → `'O''Brien'` → `'''O''''Brien'''`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sql92Dialect;

impl Sql92Dialect {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for Sql92Dialect {
    fn name(&self) -> &'static str {
        "sql92"
    }

    fn escape_value(&self, value: &str) -> SqlResult<String> {
        Ok(quote_doubling(value, '\''))
    }

    fn escape_identifier(&self, name: &str) -> SqlResult<String> {
        Ok(quote_doubling(name, '"'))
    }

    fn should_transform(&self, token: &Token) -> bool {
        matches!(token.kind(), TokenKind::String | TokenKind::QuotedIdentifier)
    }

    fn transform(&self, chain: &mut Chain, id: TokenId) -> SqlResult<TokenId> {
        let token = token_at(chain, id)?;
        match token.kind() {
            TokenKind::String => {
                let escaped = self.escape_value(token.value())?;
                rewrite_value(chain, id, escaped)
            }
            TokenKind::QuotedIdentifier => {
                let quoted = self.escape_identifier(token.value())?;
                rewrite_value(chain, id, quoted)
            }
            kind => Err(unhandled(self.name(), kind)),
        }
    }
}
