//! UPDATE statement builder.

use crate::ast::{Chain, Lexer, Token, TokenKind};
use crate::error::SqlResult;
use crate::ident::alias_chain;
use crate::qb::clause::{Assembler, Connective, Predicates, append_clauses, push_listed};
use crate::qb::{Fragment, Operation};

/// UPDATE builder: `UPDATE table SET a = 1 , b = 2 WHERE ...`.
///
/// Assignments are SQL fragments or [`Expr`](crate::Expr) comparisons
/// (`Expr::eq("a", 1)` renders `a = 1`).
#[derive(Debug, Clone)]
pub struct UpdateQuery {
    asm: Assembler,
    table: Option<Chain>,
    assignments: Option<Chain>,
    filter: Predicates,
}

impl Default for UpdateQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateQuery {
    pub fn new() -> Self {
        Self::with_lexer(Lexer::new())
    }

    pub fn with_lexer(lexer: Lexer) -> Self {
        Self {
            asm: Assembler::new(lexer),
            table: None,
            assignments: None,
            filter: Predicates::new(TokenKind::Where),
        }
    }

    /// Target table, replacing any earlier one.
    pub fn table(mut self, table: impl Into<Fragment>) -> Self {
        if let Some(tokens) = self.asm.tokens(table) {
            self.table = Some(tokens);
        }
        self
    }

    pub fn table_as(mut self, table: impl Into<Fragment>, alias: &str) -> Self {
        let table = self.asm.tokens(table);
        let alias = self.asm.record(alias_chain(alias));
        if let (Some(mut table), Some(alias)) = (table, alias) {
            table.append(alias);
            self.table = Some(table);
        }
        self
    }

    /// Add an assignment.
    pub fn set(mut self, assignment: impl Into<Fragment>) -> Self {
        if let Some(tokens) = self.asm.tokens(assignment) {
            push_listed(&mut self.assignments, &[TokenKind::Set], tokens);
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

impl Operation for UpdateQuery {
    fn operation_token(&self) -> SqlResult<Chain> {
        self.asm.check()?;

        let mut query = Chain::of(Token::keyword(TokenKind::Update));
        append_clauses(
            &mut query,
            [self.table.as_ref(), self.assignments.as_ref(), self.filter.chain()],
        );
        Ok(query)
    }
}
