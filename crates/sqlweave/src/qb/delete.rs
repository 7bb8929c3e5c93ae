//! DELETE statement builder.

use crate::ast::{Chain, Lexer, Token, TokenKind};
use crate::error::SqlResult;
use crate::ident::alias_chain;
use crate::qb::clause::{Assembler, Connective, Predicates, append_clauses, set_clause};
use crate::qb::{Fragment, Operation};

/// DELETE builder: `DELETE FROM table WHERE ...`.
///
/// A statement without predicates deletes every row; nothing guards against it.
#[derive(Debug, Clone)]
pub struct DeleteQuery {
    asm: Assembler,
    from: Option<Chain>,
    filter: Predicates,
}

impl Default for DeleteQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteQuery {
    pub fn new() -> Self {
        Self::with_lexer(Lexer::new())
    }

    pub fn with_lexer(lexer: Lexer) -> Self {
        Self {
            asm: Assembler::new(lexer),
            from: None,
            filter: Predicates::new(TokenKind::Where),
        }
    }

    /// `FROM table`, replacing any earlier table.
    pub fn from(mut self, table: impl Into<Fragment>) -> Self {
        if let Some(tokens) = self.asm.tokens(table) {
            set_clause(&mut self.from, TokenKind::From, tokens);
        }
        self
    }

    pub fn from_as(mut self, table: impl Into<Fragment>, alias: &str) -> Self {
        let table = self.asm.tokens(table);
        let alias = self.asm.record(alias_chain(alias));
        if let (Some(mut table), Some(alias)) = (table, alias) {
            table.append(alias);
            set_clause(&mut self.from, TokenKind::From, table);
        }
        self
    }

    pub fn where_with(mut self, condition: impl Into<Fragment>, connective: Option<Connective>) -> Self {
        if let Some(tokens) = self.asm.tokens(condition) {
            let result = self.filter.push(tokens, connective);
            self.asm.record(result);
        }
        self
    }

    pub fn where_(self, condition: impl Into<Fragment>) -> Self {
        self.where_with(condition, None)
    }

    pub fn and_where(self, condition: impl Into<Fragment>) -> Self {
        self.where_with(condition, Some(Connective::And))
    }

    pub fn or_where(self, condition: impl Into<Fragment>) -> Self {
        self.where_with(condition, Some(Connective::Or))
    }
}

impl Operation for DeleteQuery {
    fn operation_token(&self) -> SqlResult<Chain> {
        self.asm.check()?;

        let mut query = Chain::of(Token::keyword(TokenKind::Delete));
        append_clauses(&mut query, [self.from.as_ref(), self.filter.chain()]);
        Ok(query)
    }
}
