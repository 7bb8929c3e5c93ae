//! Statement builders.
//!
//! Builders accept SQL fragments, [`Expr`] trees and other builders, lex them
//! into token chains as they are passed in, and keep one chain per clause.
//! [`Operation::operation_token`] combines the clauses in SQL order.
//!
//! # Usage
//!
//! ```ignore
//! use sqlweave::{Expr, Fragment, JoinDirection, JoinType, QueryBuilder, qb};
//!
//! let active = qb::select().column("user_id").from("sessions");
//! let query = qb::select()
//!     .column("u.id")
//!     .column_as("COUNT(o.id)", "orders")
//!     .from_as("users", "u")
//!     .join_as("orders", "o", "o.user_id = u.id", JoinType::Outer, Some(JoinDirection::Left))
//!     .where_(Fragment::in_subquery("u.id", active))
//!     .group_by("u.id");
//!
//! let sql = QueryBuilder::default().sql(&query)?;
//!
//! let insert = qb::insert()
//!     .into("users")
//!     .columns(["name", "email"])
//!     .values([Expr::string("alice"), Expr::string("alice@example.com")]);
//!
//! let update = qb::update().table("users").set("active = 0").where_(Expr::eq("id", 7));
//! let delete = qb::delete().from("users").where_(Expr::is_null("email"));
//! # Ok::<(), sqlweave::SqlError>(())
//! ```

mod clause;
mod delete;
mod expr;
mod fragment;
mod insert;
mod select;
mod traits;
mod update;

pub use clause::{Connective, JoinDirection, JoinType, Ordering};
pub use delete::DeleteQuery;
pub use expr::Expr;
pub use fragment::Fragment;
pub use insert::InsertQuery;
pub use select::SelectQuery;
pub use traits::Operation;
pub use update::UpdateQuery;

/// Create a SELECT builder with the default lexer.
pub fn select() -> SelectQuery {
    SelectQuery::new()
}

/// Create an INSERT builder with the default lexer.
pub fn insert() -> InsertQuery {
    InsertQuery::new()
}

/// Create an UPDATE builder with the default lexer.
pub fn update() -> UpdateQuery {
    UpdateQuery::new()
}

/// Create a DELETE builder with the default lexer.
pub fn delete() -> DeleteQuery {
    DeleteQuery::new()
}
