//! SELECT statement builder.

use crate::ast::{Chain, Lexer, Token, TokenKind};
use crate::error::SqlResult;
use crate::ident::alias_chain;
use crate::qb::clause::{
    Assembler, Connective, JoinDirection, JoinType, Ordering, Predicates, append_clauses, close_paren,
    join_keywords, open_paren, push_listed, set_clause,
};
use crate::qb::{Fragment, Operation};

/// SELECT builder.
///
/// Each clause is held as its own chain and combined in SQL order when the
/// statement is assembled, so clause methods can be called in any order.
/// Repeated calls to list clauses (columns, FROM, GROUP BY, ORDER BY) add
/// comma-separated entries; LIMIT and OFFSET keep the last value.
///
/// # Example
/// ```ignore
/// use sqlweave::{Expr, qb};
///
/// let query = qb::select()
///     .columns(["id", "name"])
///     .from("users")
///     .where_(Expr::eq("status", Expr::string("active")))
///     .order_by_desc("created_at")
///     .limit(20);
/// ```
#[derive(Debug, Clone)]
pub struct SelectQuery {
    asm: Assembler,
    quantifier: Option<TokenKind>,
    columns: Option<Chain>,
    from: Option<Chain>,
    joins: Option<Chain>,
    filter: Predicates,
    group_by: Option<Chain>,
    having: Predicates,
    order_by: Option<Chain>,
    limit: Option<Chain>,
    offset: Option<Chain>,
    unions: Option<Chain>,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::with_lexer(Lexer::new())
    }

    pub fn with_lexer(lexer: Lexer) -> Self {
        Self {
            asm: Assembler::new(lexer),
            quantifier: None,
            columns: None,
            from: None,
            joins: None,
            filter: Predicates::new(TokenKind::Where),
            group_by: None,
            having: Predicates::new(TokenKind::Having),
            order_by: None,
            limit: None,
            offset: None,
            unions: None,
        }
    }

    /// `SELECT DISTINCT`
    pub fn distinct(mut self) -> Self {
        self.quantifier = Some(TokenKind::Distinct);
        self
    }

    /// `SELECT ALL`
    pub fn all(mut self) -> Self {
        self.quantifier = Some(TokenKind::All);
        self
    }

    pub fn column(mut self, expr: impl Into<Fragment>) -> Self {
        if let Some(tokens) = self.asm.tokens(expr) {
            push_listed(&mut self.columns, &[], tokens);
        }
        self
    }

    pub fn columns<I, T>(self, exprs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Fragment>,
    {
        exprs.into_iter().fold(self, |query, expr| query.column(expr))
    }

    /// `expr AS alias`; a nested statement is parenthesized.
    pub fn column_as(mut self, expr: impl Into<Fragment>, alias: &str) -> Self {
        let aliased = self.aliased(expr, alias);
        self.column(aliased)
    }

    pub fn from(mut self, source: impl Into<Fragment>) -> Self {
        if let Some(tokens) = self.asm.tokens(source) {
            push_listed(&mut self.from, &[TokenKind::From], tokens);
        }
        self
    }

    /// `FROM source AS alias`; a nested statement is parenthesized.
    pub fn from_as(mut self, source: impl Into<Fragment>, alias: &str) -> Self {
        let aliased = self.aliased(source, alias);
        self.from(aliased)
    }

    /// `[INNER | CROSS | LEFT OUTER | RIGHT OUTER | FULL OUTER] JOIN target ON ( condition )`
    ///
    /// `direction` only matters for [`JoinType::Outer`]; an outer join without
    /// a direction is a full outer join.
    pub fn join(
        mut self,
        target: impl Into<Fragment>,
        condition: impl Into<Fragment>,
        join: JoinType,
        direction: Option<JoinDirection>,
    ) -> Self {
        let target = self.asm.tokens(target);
        let condition = self.asm.tokens(condition);
        if let (Some(target), Some(condition)) = (target, condition) {
            let mut clause = join_keywords(join, direction);
            clause.append(target);
            clause.push(Token::keyword(TokenKind::On));
            clause.push(open_paren());
            clause.append(condition);
            clause.push(close_paren());
            self.push_join(clause);
        }
        self
    }

    /// [`join`](Self::join) with an aliased target.
    pub fn join_as(
        mut self,
        target: impl Into<Fragment>,
        alias: &str,
        condition: impl Into<Fragment>,
        join: JoinType,
        direction: Option<JoinDirection>,
    ) -> Self {
        let aliased = self.aliased(target, alias);
        self.join(aliased, condition, join, direction)
    }

    pub fn inner_join(self, target: impl Into<Fragment>, condition: impl Into<Fragment>) -> Self {
        self.join(target, condition, JoinType::Inner, None)
    }

    pub fn left_join(self, target: impl Into<Fragment>, condition: impl Into<Fragment>) -> Self {
        self.join(target, condition, JoinType::Outer, Some(JoinDirection::Left))
    }

    pub fn right_join(self, target: impl Into<Fragment>, condition: impl Into<Fragment>) -> Self {
        self.join(target, condition, JoinType::Outer, Some(JoinDirection::Right))
    }

    pub fn full_join(self, target: impl Into<Fragment>, condition: impl Into<Fragment>) -> Self {
        self.join(target, condition, JoinType::Outer, None)
    }

    /// `CROSS JOIN target`, without a condition.
    pub fn cross_join(mut self, target: impl Into<Fragment>) -> Self {
        if let Some(target) = self.asm.tokens(target) {
            let mut clause = join_keywords(JoinType::Cross, None);
            clause.append(target);
            self.push_join(clause);
        }
        self
    }

    fn push_join(&mut self, clause: Chain) {
        match self.joins.as_mut() {
            Some(joins) => joins.append(clause),
            None => self.joins = Some(clause),
        }
    }

    /// Add a WHERE predicate. `connective` is required for every predicate
    /// but the first.
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

    pub fn group_by(mut self, expr: impl Into<Fragment>) -> Self {
        if let Some(tokens) = self.asm.tokens(expr) {
            push_listed(&mut self.group_by, &[TokenKind::Group, TokenKind::By], tokens);
        }
        self
    }

    /// Add a HAVING predicate, with the same connective rules as WHERE.
    pub fn having_with(mut self, condition: impl Into<Fragment>, connective: Option<Connective>) -> Self {
        if let Some(tokens) = self.asm.tokens(condition) {
            let result = self.having.push(tokens, connective);
            self.asm.record(result);
        }
        self
    }

    pub fn having(self, condition: impl Into<Fragment>) -> Self {
        self.having_with(condition, None)
    }

    pub fn and_having(self, condition: impl Into<Fragment>) -> Self {
        self.having_with(condition, Some(Connective::And))
    }

    pub fn or_having(self, condition: impl Into<Fragment>) -> Self {
        self.having_with(condition, Some(Connective::Or))
    }

    /// `ORDER BY expr [ASC | DESC]`
    pub fn order_by(mut self, expr: impl Into<Fragment>, ordering: Option<Ordering>) -> Self {
        if let Some(mut tokens) = self.asm.tokens(expr) {
            if let Some(ordering) = ordering {
                tokens.push(Token::keyword(ordering.kind()));
            }
            push_listed(&mut self.order_by, &[TokenKind::Order, TokenKind::By], tokens);
        }
        self
    }

    pub fn order_by_asc(self, expr: impl Into<Fragment>) -> Self {
        self.order_by(expr, Some(Ordering::Asc))
    }

    pub fn order_by_desc(self, expr: impl Into<Fragment>) -> Self {
        self.order_by(expr, Some(Ordering::Desc))
    }

    pub fn limit(mut self, count: impl Into<Fragment>) -> Self {
        if let Some(tokens) = self.asm.tokens(count) {
            set_clause(&mut self.limit, TokenKind::Limit, tokens);
        }
        self
    }

    pub fn offset(mut self, count: impl Into<Fragment>) -> Self {
        if let Some(tokens) = self.asm.tokens(count) {
            set_clause(&mut self.offset, TokenKind::Offset, tokens);
        }
        self
    }

    /// `UNION ( query )`. The query built so far is parenthesized too.
    pub fn union(self, query: impl Into<Fragment>) -> Self {
        self.push_union(query, false)
    }

    /// `UNION ALL ( query )`
    pub fn union_all(self, query: impl Into<Fragment>) -> Self {
        self.push_union(query, true)
    }

    fn push_union(mut self, query: impl Into<Fragment>, all: bool) -> Self {
        if let Some(tokens) = self.asm.tokens(query) {
            let unions = self.unions.get_or_insert_with(Chain::new);
            unions.push(Token::keyword(TokenKind::Union));
            if all {
                unions.push(Token::keyword(TokenKind::All));
            }
            unions.push(open_paren());
            unions.append(tokens);
            unions.push(close_paren());
        }
        self
    }

    fn aliased(&mut self, expr: impl Into<Fragment>, alias: &str) -> Chain {
        let mut chain = self.asm.tokens(parenthesize_statement(expr)).unwrap_or_default();
        if let Some(alias) = self.asm.record(alias_chain(alias)) {
            chain.append(alias);
        }
        chain
    }
}

fn parenthesize_statement(fragment: impl Into<Fragment>) -> Fragment {
    match fragment.into() {
        Fragment::Statement(query) => Fragment::Subquery(query),
        other => other,
    }
}

impl Operation for SelectQuery {
    fn operation_token(&self) -> SqlResult<Chain> {
        self.asm.check()?;

        let mut query = Chain::of(Token::keyword(TokenKind::Select));
        if let Some(quantifier) = self.quantifier {
            query.push(Token::keyword(quantifier));
        }
        append_clauses(
            &mut query,
            [
                self.columns.as_ref(),
                self.from.as_ref(),
                self.joins.as_ref(),
                self.filter.chain(),
                self.group_by.as_ref(),
                self.having.chain(),
                self.order_by.as_ref(),
                self.limit.as_ref(),
                self.offset.as_ref(),
            ],
        );

        if let Some(unions) = &self.unions {
            query.wrap(open_paren(), close_paren());
            query.append(unions.clone());
        }
        Ok(query)
    }
}
