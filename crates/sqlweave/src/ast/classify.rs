//! Classification of raw lexical units into [`TokenKind`]s.

use crate::ast::TokenKind;

/// Maps a raw lexical unit to its kind.
///
/// Implementations may rewrite `unit` in place (quoted strings are unescaped
/// this way) but must otherwise be free of side effects. A custom classifier
/// can be handed to [`Lexer::with_classifier`](crate::Lexer::with_classifier).
pub trait Classifier: Send + Sync {
    fn classify(&self, unit: &mut String) -> TokenKind;
}

/// The default SQL classifier.
///
/// Rules are tried in order and the first match wins:
///
/// 1. unit ends with `(` → `Function`
/// 2. leading `:` or `?` → `Parameter`
/// 3. leading operator/punctuation character → that operator kind
/// 4. leading `'` or `"` → `String`, with delimiters stripped and doubled delimiters collapsed
/// 5. numeric literal → `Float` when it has `.` or an exponent, `Integer` otherwise
/// 6. leading letter or `_` → keyword kind if the word is a keyword, `Identifier` otherwise
/// 7. anything else → `None`
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlClassifier;

impl Classifier for SqlClassifier {
    fn classify(&self, unit: &mut String) -> TokenKind {
        let Some(first) = unit.chars().next() else {
            return TokenKind::None;
        };

        if unit.ends_with('(') {
            return TokenKind::Function;
        }
        if first == ':' || first == '?' {
            return TokenKind::Parameter;
        }
        if let Some(kind) = operator_kind(first) {
            return kind;
        }
        if first == '\'' || first == '"' {
            return unescape_string(first, unit);
        }
        if is_numeric(unit) {
            return if unit.contains(['.', 'e', 'E']) {
                TokenKind::Float
            } else {
                TokenKind::Integer
            };
        }
        if first.is_alphabetic() || first == '_' {
            return TokenKind::keyword(unit).unwrap_or(TokenKind::Identifier);
        }
        TokenKind::None
    }
}

fn operator_kind(c: char) -> Option<TokenKind> {
    let kind = match c {
        '(' => TokenKind::OpenParenthesis,
        ')' => TokenKind::CloseParenthesis,
        ',' => TokenKind::Comma,
        '/' => TokenKind::Divide,
        '.' => TokenKind::Dot,
        '=' => TokenKind::Equals,
        '>' => TokenKind::GreaterThan,
        '<' => TokenKind::LowerThan,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Multiply,
        '!' => TokenKind::Negate,
        '+' => TokenKind::Plus,
        '{' => TokenKind::OpenCurlyBrace,
        '}' => TokenKind::CloseCurlyBrace,
        _ => return None,
    };
    Some(kind)
}

/// Strip the delimiters and collapse doubled delimiters (SQL-92 escaping).
///
/// A unit that is not closed by its own delimiter is not a string.
fn unescape_string(delimiter: char, unit: &mut String) -> TokenKind {
    let width = delimiter.len_utf8();
    if unit.len() < 2 * width || !unit.ends_with(delimiter) {
        return TokenKind::None;
    }
    let inner = &unit[width..unit.len() - width];
    let doubled: String = [delimiter, delimiter].iter().collect();
    *unit = inner.replace(&doubled, delimiter.encode_utf8(&mut [0; 4]));
    TokenKind::String
}

/// `digits(.digits)*(e[+-]?digits)?`
fn is_numeric(unit: &str) -> bool {
    let (mantissa, exponent) = match unit.find(['e', 'E']) {
        Some(idx) => (&unit[..idx], Some(&unit[idx + 1..])),
        None => (unit, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !mantissa.split('.').all(all_digits) {
        return false;
    }
    match exponent {
        None => true,
        Some(exp) => all_digits(exp.strip_prefix(['+', '-']).unwrap_or(exp)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(unit: &str) -> (TokenKind, String) {
        let mut unit = unit.to_string();
        let kind = SqlClassifier.classify(&mut unit);
        (kind, unit)
    }

    #[test]
    fn function_head_wins_over_everything() {
        assert_eq!(classify("count(").0, TokenKind::Function);
        assert_eq!(classify("select(").0, TokenKind::Function);
    }

    #[test]
    fn parameters() {
        assert_eq!(classify(":user_id").0, TokenKind::Parameter);
        assert_eq!(classify("?").0, TokenKind::Parameter);
        assert_eq!(classify("?3").0, TokenKind::Parameter);
    }

    #[test]
    fn operators_map_one_to_one() {
        let cases = [
            ("(", TokenKind::OpenParenthesis),
            (")", TokenKind::CloseParenthesis),
            (",", TokenKind::Comma),
            ("/", TokenKind::Divide),
            (".", TokenKind::Dot),
            ("=", TokenKind::Equals),
            (">", TokenKind::GreaterThan),
            ("<", TokenKind::LowerThan),
            ("-", TokenKind::Minus),
            ("*", TokenKind::Multiply),
            ("!", TokenKind::Negate),
            ("+", TokenKind::Plus),
            ("{", TokenKind::OpenCurlyBrace),
            ("}", TokenKind::CloseCurlyBrace),
        ];
        for (unit, kind) in cases {
            assert_eq!(classify(unit).0, kind, "unit {unit}");
        }
        assert_eq!(classify("<=").0, TokenKind::LowerThan);
        assert_eq!(classify("!=").0, TokenKind::Negate);
    }

    #[test]
    fn strings_are_unescaped_in_place() {
        assert_eq!(classify("'it''s'"), (TokenKind::String, "it's".to_string()));
        assert_eq!(
            classify(r#""say ""hi""""#),
            (TokenKind::String, r#"say "hi""#.to_string())
        );
        assert_eq!(classify("''"), (TokenKind::String, String::new()));
    }

    #[test]
    fn unterminated_string_is_unrecognized() {
        assert_eq!(classify("'").0, TokenKind::None);
        assert_eq!(classify("'abc").0, TokenKind::None);
    }

    #[test]
    fn numbers() {
        assert_eq!(classify("42").0, TokenKind::Integer);
        assert_eq!(classify("4.2").0, TokenKind::Float);
        assert_eq!(classify("1e10").0, TokenKind::Float);
        assert_eq!(classify("1.5E-3").0, TokenKind::Float);
        assert_eq!(classify("1.2.3").0, TokenKind::Float);
    }

    #[test]
    fn words() {
        assert_eq!(classify("SELECT").0, TokenKind::Select);
        assert_eq!(classify("where").0, TokenKind::Where);
        assert_eq!(classify("users").0, TokenKind::Identifier);
        assert_eq!(classify("_private").0, TokenKind::Identifier);
    }

    #[test]
    fn leftovers_are_none() {
        assert_eq!(classify(";").0, TokenKind::None);
        assert_eq!(classify("%").0, TokenKind::None);
        assert_eq!(classify("").0, TokenKind::None);
    }
}
