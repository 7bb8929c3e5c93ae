//! Builder arguments.
//!
//! Every clause method takes an `impl Into<Fragment>`: SQL text, an [`Expr`],
//! a ready token chain or another statement builder. Nested statements are
//! assembled when they are passed in, so later changes to the nested builder
//! do not show up in the outer statement.

use crate::ast::{Chain, Lexer, Token, TokenKind};
use crate::error::{SqlError, SqlResult};
use crate::qb::{DeleteQuery, Expr, InsertQuery, Operation, SelectQuery, UpdateQuery};

#[derive(Debug)]
pub enum Fragment {
    /// SQL text to be lexed.
    Sql(String),
    Expr(Expr),
    /// Tokens spliced as they are.
    Tokens(Chain),
    /// Float literal; NaN and infinities are rejected when assembled.
    Float(f64),
    /// A statement spliced in place.
    Statement(Box<dyn Operation>),
    /// A statement spliced between parentheses.
    Subquery(Box<dyn Operation>),
    /// Several fragments, one after another.
    Parts(Vec<Fragment>),
}

impl Fragment {
    /// `( query )`
    pub fn subquery(query: impl Operation + 'static) -> Self {
        Fragment::Subquery(Box::new(query))
    }

    /// `EXISTS ( query )`
    pub fn exists(query: impl Operation + 'static) -> Self {
        Fragment::Parts(vec![
            Fragment::Tokens(Chain::of(Token::keyword(TokenKind::Exists))),
            Fragment::subquery(query),
        ])
    }

    /// `operand IN ( query )`
    pub fn in_subquery(operand: impl Into<Fragment>, query: impl Operation + 'static) -> Self {
        Fragment::Parts(vec![
            operand.into(),
            Fragment::Tokens(Chain::of(Token::keyword(TokenKind::In))),
            Fragment::subquery(query),
        ])
    }

    /// `operand NOT IN ( query )`
    pub fn not_in_subquery(operand: impl Into<Fragment>, query: impl Operation + 'static) -> Self {
        Fragment::Parts(vec![
            operand.into(),
            Fragment::Tokens(Chain::from_tokens([
                Token::keyword(TokenKind::Not),
                Token::keyword(TokenKind::In),
            ])),
            Fragment::subquery(query),
        ])
    }

    /// Turn the fragment into tokens.
    pub fn into_chain(self, lexer: &Lexer) -> SqlResult<Chain> {
        match self {
            Fragment::Sql(sql) => lexer.scan(&sql),
            Fragment::Expr(expr) => lexer.scan(&expr.to_string()),
            Fragment::Tokens(chain) => Ok(chain),
            Fragment::Float(value) if value.is_finite() => Ok(Chain::of(Token::synthetic(
                value.to_string(),
                TokenKind::Float,
            ))),
            Fragment::Float(value) => Err(SqlError::NonFiniteNumber(value.to_string())),
            Fragment::Statement(query) => query.operation_token(),
            Fragment::Subquery(query) => {
                let mut chain = query.operation_token()?;
                chain.wrap(
                    Token::synthetic("(", TokenKind::OpenParenthesis),
                    Token::synthetic(")", TokenKind::CloseParenthesis),
                );
                Ok(chain)
            }
            Fragment::Parts(parts) => {
                let mut chain = Chain::new();
                for part in parts {
                    chain.append(part.into_chain(lexer)?);
                }
                Ok(chain)
            }
        }
    }
}

impl From<&str> for Fragment {
    fn from(sql: &str) -> Self {
        Fragment::Sql(sql.to_string())
    }
}

impl From<String> for Fragment {
    fn from(sql: String) -> Self {
        Fragment::Sql(sql)
    }
}

impl From<&String> for Fragment {
    fn from(sql: &String) -> Self {
        Fragment::Sql(sql.clone())
    }
}

impl From<Expr> for Fragment {
    fn from(expr: Expr) -> Self {
        Fragment::Expr(expr)
    }
}

impl From<Chain> for Fragment {
    fn from(chain: Chain) -> Self {
        Fragment::Tokens(chain)
    }
}

impl From<Vec<Fragment>> for Fragment {
    fn from(parts: Vec<Fragment>) -> Self {
        Fragment::Parts(parts)
    }
}

macro_rules! number_fragment {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl From<$ty> for Fragment {
                fn from(value: $ty) -> Self {
                    Fragment::Tokens(Chain::of(Token::synthetic(value.to_string(), TokenKind::$kind)))
                }
            }
        )*
    };
}

number_fragment!(
    i32 => Integer,
    i64 => Integer,
    u32 => Integer,
    u64 => Integer,
    usize => Integer,
);

impl From<f64> for Fragment {
    fn from(value: f64) -> Self {
        Fragment::Float(value)
    }
}

macro_rules! statement_fragment {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Fragment {
                fn from(query: $ty) -> Self {
                    Fragment::Statement(Box::new(query))
                }
            }
        )*
    };
}

statement_fragment!(SelectQuery, InsertQuery, UpdateQuery, DeleteQuery);
