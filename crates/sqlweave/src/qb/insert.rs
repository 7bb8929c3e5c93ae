//! INSERT statement builder.

use crate::ast::{Chain, Lexer, Token, TokenKind};
use crate::error::{SqlError, SqlResult};
use crate::ident::IntoIdent;
use crate::qb::clause::{Assembler, close_paren, comma, open_paren, set_clause};
use crate::qb::{Fragment, Operation};

/// INSERT builder.
///
/// Table and column names are validated identifiers. Rows are added with
/// [`values`](Self::values), or the rows come from a nested SELECT through
/// [`select`](Self::select), never both. When columns are declared, every row
/// must have exactly one value per column.
#[derive(Debug, Clone)]
pub struct InsertQuery {
    asm: Assembler,
    into: Option<Chain>,
    columns: Vec<Chain>,
    rows: Vec<Vec<Chain>>,
    source: Option<Chain>,
}

impl Default for InsertQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl InsertQuery {
    pub fn new() -> Self {
        Self::with_lexer(Lexer::new())
    }

    pub fn with_lexer(lexer: Lexer) -> Self {
        Self {
            asm: Assembler::new(lexer),
            into: None,
            columns: Vec::new(),
            rows: Vec::new(),
            source: None,
        }
    }

    /// `INTO table`, replacing any earlier target.
    pub fn into(mut self, table: impl IntoIdent) -> Self {
        if let Some(table) = self.asm.record(table.into_ident()) {
            set_clause(&mut self.into, TokenKind::Into, table.to_chain());
        }
        self
    }

    pub fn column(mut self, name: impl IntoIdent) -> Self {
        if let Some(name) = self.asm.record(name.into_ident()) {
            self.columns.push(name.to_chain());
        }
        self
    }

    pub fn columns<I, T>(self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIdent,
    {
        names.into_iter().fold(self, |query, name| query.column(name))
    }

    /// Add one row of values.
    pub fn values<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Fragment>,
    {
        if self.source.is_some() {
            self.asm.record::<()>(Err(SqlError::ConflictingInsertSource));
            return self;
        }
        let mut row = Vec::new();
        for value in values {
            match self.asm.tokens(value) {
                Some(tokens) => row.push(tokens),
                None => return self,
            }
        }
        self.rows.push(row);
        self
    }

    /// `INSERT INTO t ( ... ) SELECT ...`, instead of value rows.
    pub fn select(mut self, query: impl Into<Fragment>) -> Self {
        if !self.rows.is_empty() {
            self.asm.record::<()>(Err(SqlError::ConflictingInsertSource));
            return self;
        }
        if let Some(tokens) = self.asm.tokens(query) {
            self.source = Some(tokens);
        }
        self
    }

    fn check_arity(&self) -> SqlResult<()> {
        if self.columns.is_empty() {
            return Ok(());
        }
        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(SqlError::ArityMismatch {
                    row: idx + 1,
                    columns: self.columns.len(),
                    values: row.len(),
                });
            }
        }
        Ok(())
    }
}

/// `( a , b , c )`
fn tuple(items: &[Chain]) -> Chain {
    let mut chain = Chain::of(open_paren());
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            chain.push(comma());
        }
        chain.append(item.clone());
    }
    chain.push(close_paren());
    chain
}

impl Operation for InsertQuery {
    fn operation_token(&self) -> SqlResult<Chain> {
        self.asm.check()?;
        self.check_arity()?;

        let mut query = Chain::of(Token::keyword(TokenKind::Insert));
        if let Some(into) = &self.into {
            query.append(into.clone());
        }
        if !self.columns.is_empty() {
            query.append(tuple(&self.columns));
        }

        if let Some(source) = &self.source {
            query.append(source.clone());
        } else if !self.rows.is_empty() {
            query.push(Token::keyword(TokenKind::Values));
            for (i, row) in self.rows.iter().enumerate() {
                if i > 0 {
                    query.push(comma());
                }
                query.append(tuple(row));
            }
        }
        Ok(query)
    }
}
