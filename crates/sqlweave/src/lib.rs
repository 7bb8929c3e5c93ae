//! # sqlweave
//!
//! SQL statement builders on top of a typed token chain, rendered per backend.
//!
//! ## Features
//!
//! - **Fragments in, tokens out**: every builder argument is lexed into classified tokens
//! - **Fixed clause order**: clause methods can be called in any order
//! - **Dialect rewriting**: SQL-92, MySQL and PostgreSQL rewrite individual tokens while rendering
//! - **Nested statements**: sub-selects, `IN`/`EXISTS` predicates and `UNION`s
//! - **Deferred errors**: the first construction error is returned when the statement is assembled
//!
//! ## Query Builder (qb)
//!
//! ```ignore
//! use sqlweave::{Expr, MySqlDialect, QueryBuilder};
//!
//! let qb = QueryBuilder::new(MySqlDialect::new());
//!
//! // SELECT
//! let query = qb
//!     .select()
//!     .columns(["id", "name"])
//!     .from("users")
//!     .where_(Expr::like("name", Expr::string("a%")))
//!     .order_by_desc("id")
//!     .limit(10);
//! let sql = qb.sql(&query)?;
//!
//! // INSERT
//! let insert = qb
//!     .insert()
//!     .into("users")
//!     .columns(["name"])
//!     .values([Expr::string("alice")]);
//!
//! // UPDATE
//! let update = qb.update().table("users").set("name = 'bob'").where_("id = 1");
//!
//! // DELETE
//! let delete = qb.delete().from("users").where_("id = 1");
//! # Ok::<(), sqlweave::SqlError>(())
//! ```
//!
//! ## Cargo features
//!
//! - `tracing`: debug-log rendered statements and warn on passthrough tokens and escape failures
//! - `postgres`: server-side escaping through a `tokio_postgres::Client`

pub mod ast;
pub mod config;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod escape;
pub mod ident;
pub mod qb;
pub mod render;

pub use ast::{Chain, Classifier, Lexer, SqlClassifier, Token, TokenId, TokenKind};
pub use config::{LexerConfig, RenderConfig, UnrecognizedPolicy};
pub use connection::DialectProvider;
pub use dialect::{Dialect, MySqlDialect, PostgresDialect, Sql92Dialect};
pub use error::{SqlError, SqlResult};
pub use escape::{MySqlEscape, MySqlLocalEscaper, PgEscape, PgLocalEscaper};
pub use ident::{Ident, IdentPart, IntoIdent};
pub use render::{QueryBuilder, render, render_operation};

pub use qb::{
    Connective, DeleteQuery, Expr, Fragment, InsertQuery, JoinDirection, JoinType, Operation,
    Ordering, SelectQuery, UpdateQuery, delete, insert, select, update,
};

#[cfg(feature = "postgres")]
pub use connection::PgServerEscaper;
