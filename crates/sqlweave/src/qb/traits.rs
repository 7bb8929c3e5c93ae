//! Trait definitions for statement builders.

use crate::ast::Chain;
use crate::error::SqlResult;
use std::fmt;

/// A statement that can be assembled into a token chain.
///
/// Assembly builds a fresh chain on every call, so a builder can be rendered
/// any number of times and keeps accepting clauses afterwards. The first
/// construction error the builder ran into is returned instead of a chain.
pub trait Operation: fmt::Debug {
    fn operation_token(&self) -> SqlResult<Chain>;
}

impl<T: Operation + ?Sized> Operation for &T {
    fn operation_token(&self) -> SqlResult<Chain> {
        (**self).operation_token()
    }
}

impl<T: Operation + ?Sized> Operation for Box<T> {
    fn operation_token(&self) -> SqlResult<Chain> {
        (**self).operation_token()
    }
}
