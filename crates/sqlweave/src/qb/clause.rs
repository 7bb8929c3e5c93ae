//! Pieces shared by the statement builders: fragment lexing with deferred
//! errors, and the WHERE/HAVING predicate list.

use crate::ast::{Chain, Lexer, Token, TokenKind};
use crate::error::{SqlError, SqlResult};
use crate::qb::Fragment;

/// Boolean connective between two predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn kind(self) -> TokenKind {
        match self {
            Connective::And => TokenKind::And,
            Connective::Or => TokenKind::Or,
        }
    }
}

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Asc,
    Desc,
}

impl Ordering {
    pub fn kind(self) -> TokenKind {
        match self {
            Ordering::Asc => TokenKind::Asc,
            Ordering::Desc => TokenKind::Desc,
        }
    }
}

/// Join family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Cross,
    Outer,
}

/// Side of an outer join. Ignored for inner and cross joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDirection {
    Left,
    Right,
}

/// Keyword tokens introducing a join.
pub(crate) fn join_keywords(join: JoinType, direction: Option<JoinDirection>) -> Chain {
    let lead = match (join, direction) {
        (JoinType::Inner, _) => vec![TokenKind::Inner],
        (JoinType::Cross, _) => vec![TokenKind::Cross],
        (JoinType::Outer, Some(JoinDirection::Left)) => vec![TokenKind::Left, TokenKind::Outer],
        (JoinType::Outer, Some(JoinDirection::Right)) => vec![TokenKind::Right, TokenKind::Outer],
        (JoinType::Outer, None) => vec![TokenKind::Full, TokenKind::Outer],
    };
    Chain::from_tokens(
        lead.into_iter()
            .chain([TokenKind::Join])
            .map(Token::keyword),
    )
}

pub(crate) fn comma() -> Token {
    Token::synthetic(",", TokenKind::Comma)
}

pub(crate) fn open_paren() -> Token {
    Token::synthetic("(", TokenKind::OpenParenthesis)
}

pub(crate) fn close_paren() -> Token {
    Token::synthetic(")", TokenKind::CloseParenthesis)
}

/// Lexes builder arguments and keeps the first error for later.
#[derive(Debug, Clone)]
pub(crate) struct Assembler {
    lexer: Lexer,
    error: Option<SqlError>,
}

impl Assembler {
    pub(crate) fn new(lexer: Lexer) -> Self {
        Self { lexer, error: None }
    }

    /// Tokens for `fragment`, or `None` after recording the failure.
    pub(crate) fn tokens(&mut self, fragment: impl Into<Fragment>) -> Option<Chain> {
        let result = fragment.into().into_chain(&self.lexer);
        self.record(result)
    }

    pub(crate) fn record<T>(&mut self, result: SqlResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                if self.error.is_none() {
                    self.error = Some(err);
                }
                None
            }
        }
    }

    pub(crate) fn check(&self) -> SqlResult<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Append a clause: `keyword tokens` the first time, `, tokens` afterwards.
pub(crate) fn push_listed(slot: &mut Option<Chain>, keyword: &[TokenKind], tokens: Chain) {
    match slot {
        Some(chain) => {
            chain.push(comma());
            chain.append(tokens);
        }
        None => {
            let mut chain = Chain::from_tokens(keyword.iter().copied().map(Token::keyword));
            chain.append(tokens);
            *slot = Some(chain);
        }
    }
}

/// Set a clause to `keyword tokens`, replacing anything set before.
pub(crate) fn set_clause(slot: &mut Option<Chain>, keyword: TokenKind, tokens: Chain) {
    let mut chain = Chain::of(Token::keyword(keyword));
    chain.append(tokens);
    *slot = Some(chain);
}

/// Predicates of a WHERE or HAVING clause.
///
/// The first predicate follows the keyword directly, and any connective given
/// with it is dropped. Every later predicate needs a connective.
#[derive(Debug, Clone)]
pub(crate) struct Predicates {
    keyword: TokenKind,
    chain: Option<Chain>,
}

impl Predicates {
    pub(crate) fn new(keyword: TokenKind) -> Self {
        Self {
            keyword,
            chain: None,
        }
    }

    pub(crate) fn push(&mut self, tokens: Chain, connective: Option<Connective>) -> SqlResult<()> {
        let Some(chain) = self.chain.as_mut() else {
            set_clause(&mut self.chain, self.keyword, tokens);
            return Ok(());
        };
        let Some(connective) = connective else {
            return Err(SqlError::MissingConnective {
                clause: self.keyword.as_str(),
            });
        };
        chain.push(Token::keyword(connective.kind()));
        chain.append(tokens);
        Ok(())
    }

    pub(crate) fn chain(&self) -> Option<&Chain> {
        self.chain.as_ref()
    }
}

/// Append clones of every present clause, in order.
pub(crate) fn append_clauses<'a>(query: &mut Chain, clauses: impl IntoIterator<Item = Option<&'a Chain>>) {
    for clause in clauses.into_iter().flatten() {
        query.append(clause.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexed(text: &str) -> Chain {
        Lexer::new().scan(text).unwrap()
    }

    #[test]
    fn first_predicate_drops_connective() {
        let mut preds = Predicates::new(TokenKind::Where);
        preds.push(lexed("a = 1"), Some(Connective::Or)).unwrap();
        preds.push(lexed("b = 2"), Some(Connective::And)).unwrap();
        assert_eq!(
            preds.chain().unwrap().values(),
            vec!["WHERE", "a", "=", "1", "AND", "b", "=", "2"]
        );
    }

    #[test]
    fn later_predicate_needs_connective() {
        let mut preds = Predicates::new(TokenKind::Having);
        preds.push(lexed("a"), None).unwrap();
        let err = preds.push(lexed("b"), None).unwrap_err();
        assert_eq!(err, SqlError::MissingConnective { clause: "HAVING" });
    }

    #[test]
    fn join_keyword_sequences() {
        let values = |t, d| join_keywords(t, d).values().join(" ");
        assert_eq!(values(JoinType::Inner, Some(JoinDirection::Left)), "INNER JOIN");
        assert_eq!(values(JoinType::Cross, None), "CROSS JOIN");
        assert_eq!(values(JoinType::Outer, Some(JoinDirection::Left)), "LEFT OUTER JOIN");
        assert_eq!(values(JoinType::Outer, Some(JoinDirection::Right)), "RIGHT OUTER JOIN");
        assert_eq!(values(JoinType::Outer, None), "FULL OUTER JOIN");
    }

    #[test]
    fn assembler_keeps_first_error() {
        let mut asm = Assembler::new(Lexer::new());
        assert!(asm.tokens("a ; b").is_none());
        assert!(asm.tokens("c % d").is_none());
        assert!(asm.tokens("ok").is_some());
        let err = asm.check().unwrap_err();
        assert_eq!(
            err,
            SqlError::UnrecognizedToken {
                unit: ";".to_string(),
                position: 2
            }
        );
    }

    #[test]
    fn listed_clause_separates_with_commas() {
        let mut slot = None;
        push_listed(&mut slot, &[TokenKind::Group, TokenKind::By], lexed("a"));
        push_listed(&mut slot, &[TokenKind::Group, TokenKind::By], lexed("b"));
        assert_eq!(slot.unwrap().values(), vec!["GROUP", "BY", "a", ",", "b"]);
    }
}
