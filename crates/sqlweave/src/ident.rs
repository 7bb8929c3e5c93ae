//! Validated SQL identifiers for builder arguments that must be names.
//!
//! [`Ident`] accepts dotted and quoted forms and turns into identifier
//! tokens separated by `Dot` tokens. Tokens carry bare names: unquoted parts
//! become `Identifier`, quoted parts `QuotedIdentifier`, which every dialect
//! quotes again when rendering.
//!
//! - Unquoted parts are validated against: `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted parts allow any characters except NUL; `""` inside stands for `"`
//!
//! # Example
//! ```ignore
//! use sqlweave::Ident;
//!
//! let t = Ident::parse("public.users")?;
//! let c = Ident::parse(r#""CamelCase"."UserTable""#)?;
//! # Ok::<(), sqlweave::SqlError>(())
//! ```

use crate::ast::{Chain, Token, TokenKind};
use crate::error::{SqlError, SqlResult};

/// One dot-separated part of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    /// Matches `[A-Za-z_][A-Za-z0-9_$]*`.
    Unquoted(String),
    /// Was written between double quotes; holds the unescaped name.
    Quoted(String),
}

/// A validated, possibly qualified, SQL name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// A single quoted part holding `name` verbatim.
    pub fn quoted(name: &str) -> SqlResult<Self> {
        check_name(name)?;
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// Parse `schema.table.column`, `"CamelCase"."User"` or a mix of both.
    pub fn parse(s: &str) -> SqlResult<Self> {
        check_name(s)?;

        let mut parts = Vec::new();
        let mut rest = s;
        loop {
            let (part, tail) = if let Some(quoted) = rest.strip_prefix('"') {
                split_quoted(quoted)?
            } else {
                split_unquoted(rest)?
            };
            parts.push(part);

            if tail.is_empty() {
                break;
            }
            rest = match tail.strip_prefix('.') {
                Some("") => {
                    return Err(SqlError::invalid_identifier(format!(
                        "Trailing '.' in identifier '{s}'"
                    )));
                }
                Some(next) => next,
                None => {
                    return Err(SqlError::invalid_identifier(format!(
                        "Expected '.' between identifier parts in '{s}'"
                    )));
                }
            };
        }

        Ok(Self { parts })
    }

    /// Bare part names, outermost first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|part| match part {
            IdentPart::Unquoted(s) | IdentPart::Quoted(s) => s.as_str(),
        })
    }

    /// Identifier tokens joined by `Dot` tokens.
    pub fn to_chain(&self) -> Chain {
        let mut chain = Chain::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                chain.push(Token::synthetic(".", TokenKind::Dot));
            }
            let token = match part {
                IdentPart::Unquoted(name) => Token::synthetic(name, TokenKind::Identifier),
                IdentPart::Quoted(name) => Token::synthetic(name, TokenKind::QuotedIdentifier),
            };
            chain.push(token);
        }
        chain
    }

    /// Parse a single-part name, as used for aliases.
    pub fn single(s: &str) -> SqlResult<Self> {
        let ident = Self::parse(s)?;
        if ident.parts.len() != 1 {
            return Err(SqlError::invalid_identifier(format!(
                "Expected a single name, got '{s}'"
            )));
        }
        Ok(ident)
    }
}

fn check_name(s: &str) -> SqlResult<()> {
    if s.is_empty() {
        return Err(SqlError::invalid_identifier("Identifier cannot be empty"));
    }
    if s.contains('\0') {
        return Err(SqlError::invalid_identifier(
            "Identifier cannot contain NUL character",
        ));
    }
    Ok(())
}

/// Body of a quoted part, `input` starting just after the opening quote.
fn split_quoted(input: &str) -> SqlResult<(IdentPart, &str)> {
    let mut name = String::new();
    let mut chars = input.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != '"' {
            name.push(c);
            continue;
        }
        if matches!(chars.peek(), Some((_, '"'))) {
            chars.next();
            name.push('"');
            continue;
        }
        if name.is_empty() {
            return Err(SqlError::invalid_identifier("Empty quoted identifier"));
        }
        return Ok((IdentPart::Quoted(name), &input[idx + 1..]));
    }
    Err(SqlError::invalid_identifier("Unclosed quoted identifier"))
}

fn split_unquoted(input: &str) -> SqlResult<(IdentPart, &str)> {
    let end = input.find('.').unwrap_or(input.len());
    let name = &input[..end];
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(SqlError::invalid_identifier("Empty identifier segment")),
        Some(c) if c != '_' && !c.is_ascii_alphabetic() => {
            return Err(SqlError::invalid_identifier(format!(
                "Invalid identifier start character: '{c}'"
            )));
        }
        Some(_) => {}
    }
    if let Some(c) = chars.find(|&c| c != '_' && c != '$' && !c.is_ascii_alphanumeric()) {
        return Err(SqlError::invalid_identifier(format!(
            "Invalid character in identifier: '{c}'"
        )));
    }
    Ok((IdentPart::Unquoted(name.to_string()), &input[end..]))
}

/// `AS alias` tokens.
pub(crate) fn alias_chain(alias: &str) -> SqlResult<Chain> {
    let mut chain = Chain::of(Token::keyword(TokenKind::As));
    chain.append(Ident::single(alias)?.to_chain());
    Ok(chain)
}

/// Anything a builder accepts where a name is required.
pub trait IntoIdent {
    fn into_ident(self) -> SqlResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> SqlResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> SqlResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(&self)
    }
}
