//! Token model, classifier and lexer.
//!
//! Fragments of SQL are scanned into a [`Chain`] of classified [`Token`]s.
//! Statement builders splice chains together and dialects rewrite
//! individual tokens while rendering.

mod classify;
mod kind;
mod lexer;
mod token;

pub use classify::{Classifier, SqlClassifier};
pub use kind::TokenKind;
pub use lexer::Lexer;
pub use token::{Chain, Iter, Token, TokenId};
