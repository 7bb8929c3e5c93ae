//! Lexer and renderer configuration.

/// What the lexer does with units that classify as [`TokenKind::None`](crate::TokenKind::None).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnrecognizedPolicy {
    /// Fail the scan with [`SqlError::UnrecognizedToken`](crate::SqlError::UnrecognizedToken).
    #[default]
    Reject,
    /// Keep the unit as a `None` token and emit a warning (with the `tracing` feature).
    Passthrough,
}

/// Configuration for [`Lexer`](crate::Lexer).
#[derive(Debug, Clone, Default)]
pub struct LexerConfig {
    /// Handling of unrecognized units.
    pub unrecognized: UnrecognizedPolicy,
}

impl LexerConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unrecognized-unit policy.
    pub fn unrecognized(mut self, policy: UnrecognizedPolicy) -> Self {
        self.unrecognized = policy;
        self
    }

    /// Shorthand for [`UnrecognizedPolicy::Passthrough`].
    pub fn permissive(self) -> Self {
        self.unrecognized(UnrecognizedPolicy::Passthrough)
    }
}

/// Configuration for [`QueryBuilder`](crate::QueryBuilder) rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Truncate the logged statement (in bytes, on a char boundary). `None` logs it whole.
    pub max_logged_sql_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_logged_sql_length: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum logged SQL length.
    pub fn max_logged_sql_length(mut self, len: usize) -> Self {
        self.max_logged_sql_length = Some(len);
        self
    }

    /// Disable truncation of the logged SQL.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql_length = None;
        self
    }
}
