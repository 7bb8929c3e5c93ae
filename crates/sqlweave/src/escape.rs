//! Native escape primitives the backend dialects call into.
//!
//! A live connection normally provides these. The `*Local*` implementations
//! follow the client libraries' own rules and need no connection.

use crate::error::{SqlError, SqlResult};

/// Escaping exposed by a MySQL connection (`mysql_real_escape_string`).
pub trait MySqlEscape {
    /// Escape `value` for use between single quotes. Quotes are not added.
    fn escape_string(&self, value: &str) -> SqlResult<String>;
}

/// Escaping exposed by a PostgreSQL connection.
pub trait PgEscape {
    /// Quote `value` as a complete string literal, delimiters included.
    fn escape_literal(&self, value: &str) -> SqlResult<String>;

    /// Quote `name` as a complete identifier, delimiters included.
    fn escape_identifier(&self, name: &str) -> SqlResult<String>;
}

impl<T: MySqlEscape + ?Sized> MySqlEscape for &T {
    fn escape_string(&self, value: &str) -> SqlResult<String> {
        (**self).escape_string(value)
    }
}

impl<T: PgEscape + ?Sized> PgEscape for &T {
    fn escape_literal(&self, value: &str) -> SqlResult<String> {
        (**self).escape_literal(value)
    }

    fn escape_identifier(&self, name: &str) -> SqlResult<String> {
        (**self).escape_identifier(name)
    }
}

/// Client-side `mysql_real_escape_string` for the `utf8mb4` character set.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlLocalEscaper;

impl MySqlEscape for MySqlLocalEscaper {
    fn escape_string(&self, value: &str) -> SqlResult<String> {
        let mut out = String::with_capacity(value.len() + 2);
        for ch in value.chars() {
            match ch {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        Ok(out)
    }
}

/// Client-side `PQescapeLiteral` / `PQescapeIdentifier` with
/// `standard_conforming_strings` on.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgLocalEscaper;

impl PgEscape for PgLocalEscaper {
    fn escape_literal(&self, value: &str) -> SqlResult<String> {
        reject_nul(value)?;
        let has_backslash = value.contains('\\');
        let mut out = String::with_capacity(value.len() + 3);
        if has_backslash {
            out.push('E');
        }
        out.push('\'');
        for ch in value.chars() {
            if ch == '\'' || (has_backslash && ch == '\\') {
                out.push(ch);
            }
            out.push(ch);
        }
        out.push('\'');
        Ok(out)
    }

    fn escape_identifier(&self, name: &str) -> SqlResult<String> {
        reject_nul(name)?;
        Ok(quote_doubling(name, '"'))
    }
}

fn reject_nul(value: &str) -> SqlResult<()> {
    if value.contains('\0') {
        return Err(SqlError::escape("value cannot contain NUL character"));
    }
    Ok(())
}

/// Wrap `value` in `quote`, doubling any embedded `quote`.
pub(crate) fn quote_doubling(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    out.push(quote);
    out
}
