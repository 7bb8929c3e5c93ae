//! Backend dialects.
//!
//! A [`Dialect`] is consulted for every token while a chain is rendered:
//! [`Dialect::should_transform`] is a cheap predicate, and
//! [`Dialect::transform`] rewrites the token in place inside the chain when
//! the predicate holds. Rewrites either replace the token (escaped literals,
//! quoted identifiers, keyword substitution) or splice extra tokens after it.

mod mysql;
mod postgres;
mod sql92;

pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sql92::Sql92Dialect;

use crate::ast::{Chain, Token, TokenId, TokenKind};
use crate::error::{SqlError, SqlResult};

/// Backend-specific token rewriting.
///
/// `transform` is only called for tokens accepted by `should_transform`, and
/// must fail with [`SqlError::UnhandledTokenKind`] for any kind it has no
/// rewrite for instead of passing the token through. The returned id is the
/// token whose text is rendered; it may differ from `id`, and rendering
/// continues from that token's forward link.
pub trait Dialect {
    /// Short name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Render `value` as a complete string literal.
    fn escape_value(&self, value: &str) -> SqlResult<String>;

    /// Render `name` as a complete quoted identifier.
    fn escape_identifier(&self, name: &str) -> SqlResult<String>;

    fn should_transform(&self, token: &Token) -> bool;

    fn transform(&self, chain: &mut Chain, id: TokenId) -> SqlResult<TokenId>;
}

impl<D: Dialect + ?Sized> Dialect for &D {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn escape_value(&self, value: &str) -> SqlResult<String> {
        (**self).escape_value(value)
    }

    fn escape_identifier(&self, name: &str) -> SqlResult<String> {
        (**self).escape_identifier(name)
    }

    fn should_transform(&self, token: &Token) -> bool {
        (**self).should_transform(token)
    }

    fn transform(&self, chain: &mut Chain, id: TokenId) -> SqlResult<TokenId> {
        (**self).transform(chain, id)
    }
}

impl<D: Dialect + ?Sized> Dialect for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn escape_value(&self, value: &str) -> SqlResult<String> {
        (**self).escape_value(value)
    }

    fn escape_identifier(&self, name: &str) -> SqlResult<String> {
        (**self).escape_identifier(name)
    }

    fn should_transform(&self, token: &Token) -> bool {
        (**self).should_transform(token)
    }

    fn transform(&self, chain: &mut Chain, id: TokenId) -> SqlResult<TokenId> {
        (**self).transform(chain, id)
    }
}

/// Look up `id`, treating a missing slot as a broken chain.
pub(crate) fn token_at(chain: &Chain, id: TokenId) -> SqlResult<&Token> {
    chain
        .get(id)
        .ok_or_else(|| SqlError::malformed(format!("no token at slot {}", id.index())))
}

/// Replace `id` with a copy carrying `value`.
pub(crate) fn rewrite_value(chain: &mut Chain, id: TokenId, value: String) -> SqlResult<TokenId> {
    let token = token_at(chain, id)?.with_value(value);
    chain.replace(id, token)
}

pub(crate) fn unhandled(dialect: &'static str, kind: TokenKind) -> SqlError {
    SqlError::UnhandledTokenKind { dialect, kind }
}

/// Log an escape primitive failure on its way to the caller.
pub(crate) fn log_escape_failure(dialect: &'static str, err: &SqlError) {
    #[cfg(feature = "tracing")]
    tracing::warn!(target: "sqlweave.dialect", dialect, error = %err, "escape primitive failed");
    #[cfg(not(feature = "tracing"))]
    let _ = (dialect, err);
}
