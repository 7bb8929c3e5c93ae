//! MySQL dialect.

use crate::ast::{Chain, Token, TokenId, TokenKind};
use crate::dialect::{Dialect, Sql92Dialect, log_escape_failure, rewrite_value, token_at, unhandled};
use crate::error::SqlResult;
use crate::escape::{MySqlEscape, MySqlLocalEscaper};

/// MySQL on top of the SQL-92 baseline.
///
/// - string literals are escaped by the connection's `escape_string` and
///   wrapped in single quotes
/// - `BINARY` is spliced after every `LIKE`, `AND`, `OR` and `WHERE` so
///   comparisons are byte-exact and case-sensitive
/// - `ILIKE` becomes `LIKE`, which is already case-insensitive here
#[derive(Debug, Clone, Default)]
pub struct MySqlDialect<E = MySqlLocalEscaper> {
    base: Sql92Dialect,
    escaper: E,
}

impl MySqlDialect {
    /// MySQL dialect with client-side escaping.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: MySqlEscape> MySqlDialect<E> {
    /// MySQL dialect escaping through a live connection.
    pub fn with_escaper(escaper: E) -> Self {
        Self {
            base: Sql92Dialect,
            escaper,
        }
    }

    pub fn escaper(&self) -> &E {
        &self.escaper
    }
}

fn forces_binary(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Like | TokenKind::Or | TokenKind::And | TokenKind::Where
    )
}

impl<E: MySqlEscape> Dialect for MySqlDialect<E> {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn escape_value(&self, value: &str) -> SqlResult<String> {
        let escaped = self
            .escaper
            .escape_string(value)
            .inspect_err(|err| log_escape_failure(self.name(), err))?;
        Ok(format!("'{escaped}'"))
    }

    fn escape_identifier(&self, name: &str) -> SqlResult<String> {
        self.base.escape_identifier(name)
    }

    fn should_transform(&self, token: &Token) -> bool {
        self.base.should_transform(token)
            || token.kind() == TokenKind::Ilike
            || forces_binary(token.kind())
    }

    fn transform(&self, chain: &mut Chain, id: TokenId) -> SqlResult<TokenId> {
        let token = token_at(chain, id)?;
        match token.kind() {
            kind if forces_binary(kind) => {
                chain.insert_after(id, Token::synthetic("BINARY", TokenKind::Keyword))?;
                Ok(id)
            }
            TokenKind::Ilike => {
                let like = match token.position() {
                    Some(position) => Token::new("LIKE", TokenKind::Like, position),
                    None => Token::keyword(TokenKind::Like),
                };
                chain.replace(id, like)
            }
            TokenKind::String => {
                let escaped = self.escape_value(token.value())?;
                rewrite_value(chain, id, escaped)
            }
            TokenKind::QuotedIdentifier => self.base.transform(chain, id),
            kind => Err(unhandled(self.name(), kind)),
        }
    }
}
