//! The closed set of lexical and keyword categories.

use std::fmt;

/// Category of a token in a chain.
///
/// Structural and literal kinds come first, followed by every SQL keyword the
/// statement builders emit. Keyword kinds are matched case-insensitively by
/// [`TokenKind::keyword`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unrecognized single character (usually stray punctuation).
    None,
    Integer,
    Float,
    /// Quoted literal; the value is stored unescaped.
    String,
    /// Placeholder: `?`, `?1` or `:name`.
    Parameter,
    OpenParenthesis,
    CloseParenthesis,
    Comma,
    Divide,
    Dot,
    Equals,
    GreaterThan,
    LowerThan,
    Minus,
    Multiply,
    Negate,
    Plus,
    OpenCurlyBrace,
    CloseCurlyBrace,
    Identifier,
    /// Name the caller wrote in double quotes; the value is stored unquoted.
    ///
    /// Every dialect re-quotes this kind through `escape_identifier`.
    QuotedIdentifier,
    /// Generic keyword: function names and dialect-inserted words such as `BINARY`.
    ///
    /// Dialects never identifier-quote this kind.
    Keyword,
    /// Classifier-only kind for `name(`; the lexer splits it into `Keyword` + `OpenParenthesis`.
    Function,

    // Keywords
    All,
    Alter,
    And,
    Any,
    As,
    Asc,
    Between,
    Both,
    By,
    Cascade,
    Case,
    Cross,
    Delete,
    Desc,
    Distinct,
    Else,
    Empty,
    End,
    Escape,
    Exists,
    False,
    From,
    Full,
    Group,
    Having,
    Hidden,
    Ilike,
    In,
    Index,
    Inner,
    Insert,
    Instance,
    Into,
    Is,
    Join,
    Leading,
    Left,
    Like,
    Limit,
    Member,
    New,
    Not,
    Null,
    Of,
    Offset,
    On,
    Or,
    Order,
    Outer,
    Partial,
    Right,
    Select,
    Set,
    Some,
    Sum,
    Table,
    Then,
    Trailing,
    True,
    Union,
    Update,
    Using,
    Values,
    When,
    Where,
    With,
}

/// Keyword kinds in declaration order.
const KEYWORDS: &[TokenKind] = &[
    TokenKind::All,
    TokenKind::Alter,
    TokenKind::And,
    TokenKind::Any,
    TokenKind::As,
    TokenKind::Asc,
    TokenKind::Between,
    TokenKind::Both,
    TokenKind::By,
    TokenKind::Cascade,
    TokenKind::Case,
    TokenKind::Cross,
    TokenKind::Delete,
    TokenKind::Desc,
    TokenKind::Distinct,
    TokenKind::Else,
    TokenKind::Empty,
    TokenKind::End,
    TokenKind::Escape,
    TokenKind::Exists,
    TokenKind::False,
    TokenKind::From,
    TokenKind::Full,
    TokenKind::Group,
    TokenKind::Having,
    TokenKind::Hidden,
    TokenKind::Ilike,
    TokenKind::In,
    TokenKind::Index,
    TokenKind::Inner,
    TokenKind::Insert,
    TokenKind::Instance,
    TokenKind::Into,
    TokenKind::Is,
    TokenKind::Join,
    TokenKind::Leading,
    TokenKind::Left,
    TokenKind::Like,
    TokenKind::Limit,
    TokenKind::Member,
    TokenKind::New,
    TokenKind::Not,
    TokenKind::Null,
    TokenKind::Of,
    TokenKind::Offset,
    TokenKind::On,
    TokenKind::Or,
    TokenKind::Order,
    TokenKind::Outer,
    TokenKind::Partial,
    TokenKind::Right,
    TokenKind::Select,
    TokenKind::Set,
    TokenKind::Some,
    TokenKind::Sum,
    TokenKind::Table,
    TokenKind::Then,
    TokenKind::Trailing,
    TokenKind::True,
    TokenKind::Union,
    TokenKind::Update,
    TokenKind::Using,
    TokenKind::Values,
    TokenKind::When,
    TokenKind::Where,
    TokenKind::With,
];

impl TokenKind {
    /// Look up a keyword kind by its spelling, ignoring ASCII case.
    ///
    /// Returns `None` for anything that is not one of the fixed SQL keywords,
    /// including the meta kinds (`Keyword`, `Function`, `Identifier`, ...).
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(word))
    }

    /// All keyword kinds.
    pub fn keywords() -> &'static [TokenKind] {
        KEYWORDS
    }

    /// Whether this kind is one of the fixed SQL keywords.
    pub fn is_keyword(self) -> bool {
        KEYWORDS.contains(&self)
    }

    /// Upper-case name; for keyword kinds this is also the SQL spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::None => "NONE",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Parameter => "PARAMETER",
            TokenKind::OpenParenthesis => "OPEN_PARENTHESIS",
            TokenKind::CloseParenthesis => "CLOSE_PARENTHESIS",
            TokenKind::Comma => "COMMA",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Dot => "DOT",
            TokenKind::Equals => "EQUALS",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::LowerThan => "LOWER_THAN",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Negate => "NEGATE",
            TokenKind::Plus => "PLUS",
            TokenKind::OpenCurlyBrace => "OPEN_CURLY_BRACE",
            TokenKind::CloseCurlyBrace => "CLOSE_CURLY_BRACE",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::QuotedIdentifier => "QUOTED_IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Function => "FUNCTION",
            TokenKind::All => "ALL",
            TokenKind::Alter => "ALTER",
            TokenKind::And => "AND",
            TokenKind::Any => "ANY",
            TokenKind::As => "AS",
            TokenKind::Asc => "ASC",
            TokenKind::Between => "BETWEEN",
            TokenKind::Both => "BOTH",
            TokenKind::By => "BY",
            TokenKind::Cascade => "CASCADE",
            TokenKind::Case => "CASE",
            TokenKind::Cross => "CROSS",
            TokenKind::Delete => "DELETE",
            TokenKind::Desc => "DESC",
            TokenKind::Distinct => "DISTINCT",
            TokenKind::Else => "ELSE",
            TokenKind::Empty => "EMPTY",
            TokenKind::End => "END",
            TokenKind::Escape => "ESCAPE",
            TokenKind::Exists => "EXISTS",
            TokenKind::False => "FALSE",
            TokenKind::From => "FROM",
            TokenKind::Full => "FULL",
            TokenKind::Group => "GROUP",
            TokenKind::Having => "HAVING",
            TokenKind::Hidden => "HIDDEN",
            TokenKind::Ilike => "ILIKE",
            TokenKind::In => "IN",
            TokenKind::Index => "INDEX",
            TokenKind::Inner => "INNER",
            TokenKind::Insert => "INSERT",
            TokenKind::Instance => "INSTANCE",
            TokenKind::Into => "INTO",
            TokenKind::Is => "IS",
            TokenKind::Join => "JOIN",
            TokenKind::Leading => "LEADING",
            TokenKind::Left => "LEFT",
            TokenKind::Like => "LIKE",
            TokenKind::Limit => "LIMIT",
            TokenKind::Member => "MEMBER",
            TokenKind::New => "NEW",
            TokenKind::Not => "NOT",
            TokenKind::Null => "NULL",
            TokenKind::Of => "OF",
            TokenKind::Offset => "OFFSET",
            TokenKind::On => "ON",
            TokenKind::Or => "OR",
            TokenKind::Order => "ORDER",
            TokenKind::Outer => "OUTER",
            TokenKind::Partial => "PARTIAL",
            TokenKind::Right => "RIGHT",
            TokenKind::Select => "SELECT",
            TokenKind::Set => "SET",
            TokenKind::Some => "SOME",
            TokenKind::Sum => "SUM",
            TokenKind::Table => "TABLE",
            TokenKind::Then => "THEN",
            TokenKind::Trailing => "TRAILING",
            TokenKind::True => "TRUE",
            TokenKind::Union => "UNION",
            TokenKind::Update => "UPDATE",
            TokenKind::Using => "USING",
            TokenKind::Values => "VALUES",
            TokenKind::When => "WHEN",
            TokenKind::Where => "WHERE",
            TokenKind::With => "WITH",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_ignores_case() {
        assert_eq!(TokenKind::keyword("select"), Some(TokenKind::Select));
        assert_eq!(TokenKind::keyword("SeLeCt"), Some(TokenKind::Select));
        assert_eq!(TokenKind::keyword("ILIKE"), Some(TokenKind::Ilike));
    }

    #[test]
    fn meta_kinds_are_not_keywords() {
        assert_eq!(TokenKind::keyword("function"), None);
        assert_eq!(TokenKind::keyword("keyword"), None);
        assert_eq!(TokenKind::keyword("identifier"), None);
        assert_eq!(TokenKind::keyword("users"), None);
        assert!(!TokenKind::Function.is_keyword());
    }

    #[test]
    fn keyword_spelling_round_trips() {
        for kind in TokenKind::keywords() {
            assert_eq!(TokenKind::keyword(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn display_uses_upper_case_name() {
        assert_eq!(TokenKind::OpenParenthesis.to_string(), "OPEN_PARENTHESIS");
        assert_eq!(TokenKind::Where.to_string(), "WHERE");
    }
}
