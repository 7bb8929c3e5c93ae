//! Regex-driven scanner that turns SQL fragments into token chains.

use crate::ast::{Chain, Classifier, SqlClassifier, Token, TokenKind};
use crate::config::{LexerConfig, UnrecognizedPolicy};
use crate::error::{SqlError, SqlResult};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Ordered alternation; every capturing group is a unit, the bare
/// alternatives (whitespace, `--` comments) are dropped.
const PATTERN: &str = concat!(
    r"([\p{L}_][\p{L}\p{N}_]*\()", // function head
    r"|([\p{L}_][\p{L}\p{N}_]*)", // identifier, keyword or alias
    r"|([0-9]+(?:\.[0-9]+)*(?:[eE][+-]?[0-9]+)?)", // number
    r"|('(?:[^']|'')*')", // single-quoted string
    r#"|("(?:[^"]|"")*")"#, // double-quoted string
    r"|(\?[0-9]*|:[\p{L}_][\p{L}\p{N}_]*)", // placeholder
    r"|(<=|>=|<>|!=)", // two-character comparison
    r"|\s+",
    r"|--[^\n]*",
    r"|(.)",
);

fn pattern() -> &'static Regex {
    static LEXER_RE: OnceLock<Regex> = OnceLock::new();
    LEXER_RE.get_or_init(|| Regex::new(PATTERN).expect("invalid built-in lexer regex"))
}

/// SQL fragment scanner.
///
/// A lexer holds no per-scan state: [`Lexer::scan`] takes `&self`, and clones
/// share the compiled pattern and classifier.
#[derive(Clone)]
pub struct Lexer {
    pattern: Regex,
    classifier: Arc<dyn Classifier>,
    config: LexerConfig,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("classifier", &"<dyn Classifier>")
            .field("config", &self.config)
            .finish()
    }
}

impl Lexer {
    /// Create a lexer with the default classifier and configuration.
    pub fn new() -> Self {
        Self::with_config(LexerConfig::default())
    }

    /// Create a lexer with the default classifier.
    pub fn with_config(config: LexerConfig) -> Self {
        Self {
            pattern: pattern().clone(),
            classifier: Arc::new(SqlClassifier),
            config,
        }
    }

    /// Replace the classifier; scanning itself is unchanged.
    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Tokenize `text` into a chain. Empty or comment-only input yields an empty chain.
    ///
    /// Function heads (`name(`) become a `Keyword` token carrying the name and
    /// source position followed by a synthetic `OpenParenthesis`.
    pub fn scan(&self, text: &str) -> SqlResult<Chain> {
        let mut chain = Chain::new();

        for caps in self.pattern.captures_iter(text) {
            let Some(unit) = caps.iter().skip(1).flatten().next() else {
                continue;
            };
            let position = unit.start();
            let mut value = unit.as_str().to_string();

            match self.classifier.classify(&mut value) {
                TokenKind::Function => {
                    let name = value.strip_suffix('(').unwrap_or(&value);
                    chain.push(Token::new(name, TokenKind::Keyword, position));
                    chain.push(Token::synthetic("(", TokenKind::OpenParenthesis));
                }
                TokenKind::None => match self.config.unrecognized {
                    UnrecognizedPolicy::Reject => {
                        return Err(SqlError::UnrecognizedToken { unit: value, position });
                    }
                    UnrecognizedPolicy::Passthrough => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            target: "sqlweave.lexer",
                            unit = %value,
                            position,
                            "passing through unrecognized token"
                        );
                        chain.push(Token::new(value, TokenKind::None, position));
                    }
                },
                kind => {
                    chain.push(Token::new(value, kind, position));
                }
            }
        }

        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        Lexer::new().scan(text).unwrap().kinds()
    }

    #[test]
    fn scans_select_with_escaped_string() {
        let chain = Lexer::new().scan("SELECT a, 'it''s'").unwrap();
        assert_eq!(
            chain.kinds(),
            vec![
                TokenKind::Select,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::String
            ]
        );
        assert_eq!(chain.values(), vec!["SELECT", "a", ",", "it's"]);
        let positions: Vec<_> = chain.iter().map(Token::position).collect();
        assert_eq!(positions, vec![Some(0), Some(7), Some(8), Some(10)]);
    }

    #[test]
    fn whitespace_and_comments_yield_empty_chain() {
        let lexer = Lexer::new();
        assert!(lexer.scan("").unwrap().is_empty());
        assert!(lexer.scan("   \n\t ").unwrap().is_empty());
        assert!(lexer.scan("-- just a comment").unwrap().is_empty());
        assert!(lexer.scan("  -- one\n  -- two\n").unwrap().is_empty());
    }

    #[test]
    fn function_head_expands_to_keyword_and_parenthesis() {
        let chain = Lexer::new().scan("foo(1)").unwrap();
        let tokens: Vec<_> = chain.iter().collect();
        assert_eq!(tokens[0].kind(), TokenKind::Keyword);
        assert_eq!(tokens[0].value(), "foo");
        assert_eq!(tokens[0].position(), Some(0));
        assert_eq!(tokens[1].kind(), TokenKind::OpenParenthesis);
        assert!(tokens[1].is_synthetic());
        assert_eq!(tokens[2].kind(), TokenKind::Integer);
        assert_eq!(tokens[3].kind(), TokenKind::CloseParenthesis);
    }

    #[test]
    fn function_name_with_space_is_identifier() {
        assert_eq!(
            kinds("foo (1)"),
            vec![
                TokenKind::Identifier,
                TokenKind::OpenParenthesis,
                TokenKind::Integer,
                TokenKind::CloseParenthesis
            ]
        );
    }

    #[test]
    fn qualified_names_and_numbers() {
        assert_eq!(
            kinds("u.id >= 1.5e3"),
            vec![
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::GreaterThan,
                TokenKind::Float
            ]
        );
        let chain = Lexer::new().scan("a <> 3").unwrap();
        assert_eq!(chain.values(), vec!["a", "<>", "3"]);
    }

    #[test]
    fn exponent_in_either_case() {
        let chain = Lexer::new().scan("1e10 + 1.5E-3").unwrap();
        assert_eq!(chain.values(), vec!["1e10", "+", "1.5E-3"]);
        assert_eq!(
            chain.kinds(),
            vec![TokenKind::Float, TokenKind::Plus, TokenKind::Float]
        );
    }

    #[test]
    fn placeholders() {
        assert_eq!(
            kinds("id = :id OR id = ? OR id = ?2"),
            vec![
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Parameter,
                TokenKind::Or,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Parameter,
                TokenKind::Or,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Parameter
            ]
        );
    }

    #[test]
    fn trailing_comment_is_dropped() {
        let chain = Lexer::new().scan("a - 1 -- minus one").unwrap();
        assert_eq!(chain.values(), vec!["a", "-", "1"]);
    }

    #[test]
    fn unrecognized_unit_is_rejected_with_position() {
        let err = Lexer::new().scan("a ; b").unwrap_err();
        assert_eq!(
            err,
            SqlError::UnrecognizedToken {
                unit: ";".to_string(),
                position: 2
            }
        );
    }

    #[test]
    fn unterminated_string_is_rejected() {
        let err = Lexer::new().scan("name = 'oops").unwrap_err();
        assert!(err.is_unrecognized_token());
    }

    #[test]
    fn passthrough_keeps_unrecognized_unit() {
        let lexer = Lexer::with_config(LexerConfig::new().permissive());
        let chain = lexer.scan("a % b").unwrap();
        assert_eq!(
            chain.kinds(),
            vec![TokenKind::Identifier, TokenKind::None, TokenKind::Identifier]
        );
    }

    #[test]
    fn custom_classifier_is_used() {
        struct Shouting;
        impl Classifier for Shouting {
            fn classify(&self, unit: &mut String) -> TokenKind {
                *unit = unit.to_uppercase();
                TokenKind::Keyword
            }
        }

        let chain = Lexer::new().with_classifier(Shouting).scan("a b").unwrap();
        assert_eq!(chain.values(), vec!["A", "B"]);
        assert_eq!(chain.kinds(), vec![TokenKind::Keyword, TokenKind::Keyword]);
    }

    #[test]
    fn scans_are_independent() {
        let lexer = Lexer::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let lexer = lexer.clone();
                std::thread::spawn(move || lexer.scan(&format!("SELECT c{i} FROM t{i}")).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let chain = handle.join().unwrap();
            let column = format!("c{i}");
            let table = format!("t{i}");
            assert_eq!(chain.values(), vec!["SELECT", column.as_str(), "FROM", table.as_str()]);
        }
    }

    #[test]
    fn unicode_identifiers_keep_byte_offsets() {
        let chain = Lexer::new().scan("café = 'é'").unwrap();
        let tokens: Vec<_> = chain.iter().collect();
        assert_eq!(tokens[0].value(), "café");
        assert_eq!(tokens[1].position(), Some(6));
        assert_eq!(tokens[2].value(), "é");
        assert_eq!(tokens[2].position(), Some(8));
    }
}
