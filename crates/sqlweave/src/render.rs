//! Rendering of token chains through a dialect, and the [`QueryBuilder`]
//! entry point that ties a lexer, a dialect and the statement builders
//! together.

use crate::ast::{Chain, Lexer, TokenId};
use crate::config::RenderConfig;
use crate::connection::DialectProvider;
use crate::dialect::{Dialect, Sql92Dialect, token_at};
use crate::error::{SqlError, SqlResult};
use crate::qb::{DeleteQuery, InsertQuery, Operation, SelectQuery, UpdateQuery};

/// Walk `chain` from its head, let `dialect` rewrite the tokens it asks for,
/// and join the resulting values with single spaces.
///
/// A dialect rewrite may replace the current token or splice new tokens after
/// it; the walk continues from the forward link of whatever token the dialect
/// returned, so spliced tokens are visited too. Revisiting a slot or following
/// a dangling link fails with [`SqlError::MalformedChain`].
pub fn render<D: Dialect + ?Sized>(mut chain: Chain, dialect: &D) -> SqlResult<String> {
    let mut visited = vec![false; chain.slots()];
    let mut parts: Vec<String> = Vec::with_capacity(chain.len());
    let mut cursor = chain.head();

    while let Some(id) = cursor {
        mark_visited(&mut visited, id)?;

        let token = token_at(&chain, id)?;
        let rendered = if dialect.should_transform(token) {
            let new_id = dialect.transform(&mut chain, id)?;
            if new_id != id {
                mark_visited(&mut visited, new_id)?;
            }
            new_id
        } else {
            id
        };

        let token = token_at(&chain, rendered)?;
        parts.push(token.value().to_string());
        cursor = token.next();
    }

    Ok(parts.join(" "))
}

/// Assemble `operation` and render it.
pub fn render_operation<D: Dialect + ?Sized>(operation: &dyn Operation, dialect: &D) -> SqlResult<String> {
    render(operation.operation_token()?, dialect)
}

fn mark_visited(visited: &mut Vec<bool>, id: TokenId) -> SqlResult<()> {
    let slot = id.index();
    if slot >= visited.len() {
        visited.resize(slot + 1, false);
    }
    if std::mem::replace(&mut visited[slot], true) {
        return Err(SqlError::malformed(format!("cycle at slot {slot}")));
    }
    Ok(())
}

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let end = (0..=max_bytes)
        .rev()
        .find(|&idx| sql.is_char_boundary(idx))
        .unwrap_or(0);
    &sql[..end]
}

/// Factory for statement builders bound to one dialect.
///
/// Builders are created with a clone of this builder's lexer; rendering goes
/// through [`QueryBuilder::sql`].
///
/// # Example
/// ```ignore
/// use sqlweave::{MySqlDialect, QueryBuilder};
///
/// let qb = QueryBuilder::new(MySqlDialect::new());
/// let query = qb.select().column("id").from("users").where_("name LIKE 'a%'");
/// assert_eq!(
///     qb.sql(&query)?,
///     "SELECT id FROM users WHERE BINARY name LIKE BINARY 'a%'"
/// );
/// # Ok::<(), sqlweave::SqlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder<D = Sql92Dialect> {
    lexer: Lexer,
    dialect: D,
    config: RenderConfig,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(Sql92Dialect)
    }
}

impl<D: Dialect> QueryBuilder<D> {
    pub fn new(dialect: D) -> Self {
        Self {
            lexer: Lexer::new(),
            dialect,
            config: RenderConfig::default(),
        }
    }

    /// Use the dialect a connection hands out.
    pub fn from_provider<P>(provider: &P) -> Self
    where
        P: DialectProvider<Dialect = D>,
    {
        Self::new(provider.dialect())
    }

    pub fn with_lexer(mut self, lexer: Lexer) -> Self {
        self.lexer = lexer;
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn select(&self) -> SelectQuery {
        SelectQuery::with_lexer(self.lexer.clone())
    }

    pub fn insert(&self) -> InsertQuery {
        InsertQuery::with_lexer(self.lexer.clone())
    }

    pub fn update(&self) -> UpdateQuery {
        UpdateQuery::with_lexer(self.lexer.clone())
    }

    pub fn delete(&self) -> DeleteQuery {
        DeleteQuery::with_lexer(self.lexer.clone())
    }

    /// Render a complete statement.
    ///
    /// The builder's first construction error, if any, is returned before
    /// anything is rendered.
    pub fn sql(&self, operation: &dyn Operation) -> SqlResult<String> {
        let sql = render_operation(operation, &self.dialect)?;
        self.log_sql(&sql);
        Ok(sql)
    }

    /// Render an already assembled chain.
    pub fn render_chain(&self, chain: Chain) -> SqlResult<String> {
        let sql = render(chain, &self.dialect)?;
        self.log_sql(&sql);
        Ok(sql)
    }

    #[cfg(feature = "tracing")]
    fn log_sql(&self, sql: &str) {
        let logged = match self.config.max_logged_sql_length {
            Some(max) => truncate_sql_bytes(sql, max),
            None => sql,
        };
        tracing::debug!(
            target: "sqlweave.sql",
            dialect = self.dialect.name(),
            truncated = logged.len() < sql.len(),
            sql = %logged,
            "rendered statement"
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn log_sql(&self, _sql: &str) {}
}
