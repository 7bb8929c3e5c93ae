//! Token nodes and the arena-backed chain that links them.
//!
//! A [`Chain`] owns every token it links. Tokens refer to each other through
//! [`TokenId`] indices into the chain's arena, so splicing or replacing a node
//! never invalidates another node's links and the backward link carries no
//! ownership.

use crate::ast::TokenKind;
use crate::error::{SqlError, SqlResult};

/// Index of a token inside a [`Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(usize);

impl TokenId {
    /// Raw arena slot.
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// A single classified lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    value: String,
    kind: TokenKind,
    /// Byte offset in the lexed input; `None` for synthetic tokens.
    position: Option<usize>,
    next: Option<TokenId>,
    prev: Option<TokenId>,
}

impl Token {
    /// A token produced by the lexer at `position`.
    pub fn new(value: impl Into<String>, kind: TokenKind, position: usize) -> Self {
        Self {
            value: value.into(),
            kind,
            position: Some(position),
            next: None,
            prev: None,
        }
    }

    /// A token inserted by a builder or dialect, not traceable to any input.
    pub fn synthetic(value: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            value: value.into(),
            kind,
            position: None,
            next: None,
            prev: None,
        }
    }

    /// A synthetic keyword token spelled the way the kind is named.
    pub fn keyword(kind: TokenKind) -> Self {
        Self::synthetic(kind.as_str(), kind)
    }

    /// Copy of `self` with a different value, keeping kind and position.
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind: self.kind,
            position: self.position,
            next: None,
            prev: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Source byte offset, or `None` when the token is synthetic.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_synthetic(&self) -> bool {
        self.position.is_none()
    }

    pub fn next(&self) -> Option<TokenId> {
        self.next
    }

    /// Convenience back-link; not used for anything but navigation.
    pub fn prev(&self) -> Option<TokenId> {
        self.prev
    }
}

/// An ordered, singly-owned sequence of tokens.
///
/// Tokens live in an arena; the chain order is given by each token's forward
/// link starting at [`Chain::head`]. Replaced tokens stay in the arena but are
/// no longer reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    nodes: Vec<Token>,
    head: Option<TokenId>,
    tail: Option<TokenId>,
    len: usize,
}

impl Chain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain holding a single token.
    pub fn of(token: Token) -> Self {
        let mut chain = Self::new();
        chain.push(token);
        chain
    }

    /// Create a chain from tokens in order.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut chain = Self::new();
        for token in tokens {
            chain.push(token);
        }
        chain
    }

    pub fn head(&self) -> Option<TokenId> {
        self.head
    }

    pub fn tail(&self) -> Option<TokenId> {
        self.tail
    }

    /// Number of linked tokens.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of arena slots, including unlinked (replaced) tokens.
    pub fn slots(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.nodes.get(id.0)
    }

    fn linked(&self, id: TokenId) -> SqlResult<&Token> {
        let token = self
            .nodes
            .get(id.0)
            .ok_or_else(|| SqlError::malformed(format!("no token at slot {}", id.0)))?;
        if token.prev.is_none() && self.head != Some(id) {
            return Err(SqlError::malformed(format!("slot {} is not linked", id.0)));
        }
        Ok(token)
    }

    fn relink_prev(&mut self, id: TokenId, prev: TokenId) -> SqlResult<()> {
        let token = self
            .nodes
            .get_mut(id.0)
            .ok_or_else(|| SqlError::malformed(format!("dangling link to slot {}", id.0)))?;
        token.prev = Some(prev);
        Ok(())
    }

    fn alloc(&mut self, mut token: Token) -> TokenId {
        token.next = None;
        token.prev = None;
        let id = TokenId(self.nodes.len());
        self.nodes.push(token);
        id
    }

    /// Link `token` at the tail and return its id.
    pub fn push(&mut self, token: Token) -> TokenId {
        let id = self.alloc(token);
        match self.tail {
            Some(tail) => {
                self.nodes[tail.0].next = Some(id);
                self.nodes[id.0].prev = Some(tail);
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Link `token` before the current head.
    pub fn push_front(&mut self, token: Token) -> TokenId {
        let id = self.alloc(token);
        match self.head {
            Some(head) => {
                self.nodes[id.0].next = Some(head);
                self.nodes[head.0].prev = Some(id);
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        id
    }

    /// Splice every token of `other`, in order, onto the tail of `self`.
    ///
    /// `other` is consumed, so a chain can never be appended into itself.
    pub fn append(&mut self, other: Chain) {
        let mut other = other;
        let mut cursor = other.head;
        let mut remaining = other.nodes.len();
        while let Some(id) = cursor {
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            let Some(slot) = other.nodes.get_mut(id.0) else {
                break;
            };
            cursor = slot.next;
            let token = std::mem::replace(slot, Token::synthetic(String::new(), TokenKind::None));
            self.push(token);
        }
    }

    /// Link `token` directly after `id`, keeping the rest of the chain behind it.
    pub fn insert_after(&mut self, id: TokenId, token: Token) -> SqlResult<TokenId> {
        let after = self.linked(id)?.next;
        let new_id = self.alloc(token);
        self.nodes[new_id.0].prev = Some(id);
        self.nodes[new_id.0].next = after;
        self.nodes[id.0].next = Some(new_id);
        match after {
            Some(after) => self.relink_prev(after, new_id)?,
            None => self.tail = Some(new_id),
        }
        self.len += 1;
        Ok(new_id)
    }

    /// Put `token` in place of `id` and return the replacement's id.
    ///
    /// The replacement inherits both links of the replaced token; the old slot
    /// is unlinked. The returned id is never the same as `id`.
    pub fn replace(&mut self, id: TokenId, token: Token) -> SqlResult<TokenId> {
        let (prev, next) = {
            let old = self.linked(id)?;
            (old.prev, old.next)
        };
        let new_id = self.alloc(token);
        self.nodes[new_id.0].prev = prev;
        self.nodes[new_id.0].next = next;
        match prev {
            Some(prev) => self.nodes[prev.0].next = Some(new_id),
            None => self.head = Some(new_id),
        }
        match next {
            Some(next) => self.relink_prev(next, new_id)?,
            None => self.tail = Some(new_id),
        }
        let old = &mut self.nodes[id.0];
        old.prev = None;
        old.next = None;
        Ok(new_id)
    }

    /// Surround the whole chain with `open` and `close`.
    pub fn wrap(&mut self, open: Token, close: Token) {
        self.push_front(open);
        self.push(close);
    }

    /// Iterate tokens in chain order.
    ///
    /// Stops early instead of looping if the links are corrupted; use
    /// [`Chain::walk`] to get an error in that case.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            chain: self,
            cursor: self.head,
            budget: self.nodes.len(),
        }
    }

    /// Collect tokens in chain order, failing on cycles and dangling links.
    pub fn walk(&self) -> SqlResult<Vec<&Token>> {
        let mut seen = vec![false; self.nodes.len()];
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let token = self
                .nodes
                .get(id.0)
                .ok_or_else(|| SqlError::malformed(format!("dangling link to slot {}", id.0)))?;
            if std::mem::replace(&mut seen[id.0], true) {
                return Err(SqlError::malformed(format!("cycle at slot {}", id.0)));
            }
            out.push(token);
            cursor = token.next;
        }
        Ok(out)
    }

    /// Token kinds in chain order.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.iter().map(Token::kind).collect()
    }

    /// Token values in chain order.
    pub fn values(&self) -> Vec<&str> {
        self.iter().map(Token::value).collect()
    }

    #[cfg(test)]
    pub(crate) fn link_unchecked(&mut self, from: TokenId, to: TokenId) {
        self.nodes[from.0].next = Some(to);
    }
}

/// Iterator over a chain in link order.
pub struct Iter<'a> {
    chain: &'a Chain,
    cursor: Option<TokenId>,
    budget: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        if self.budget == 0 {
            self.cursor = None;
            return None;
        }
        self.budget -= 1;
        let token = self.chain.get(id)?;
        self.cursor = token.next;
        Some(token)
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Token;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token::synthetic(name, TokenKind::Identifier)
    }

    #[test]
    fn push_links_in_order() {
        let chain = Chain::from_tokens([ident("a"), ident("b"), ident("c")]);
        assert_eq!(chain.values(), vec!["a", "b", "c"]);
        assert_eq!(chain.len(), 3);
        let tail = chain.tail().unwrap();
        let prev = chain.get(tail).unwrap().prev().unwrap();
        assert_eq!(chain.get(prev).unwrap().value(), "b");
    }

    #[test]
    fn append_splices_other_chain() {
        let mut chain = Chain::of(ident("a"));
        chain.append(Chain::from_tokens([ident("b"), ident("c")]));
        chain.append(Chain::new());
        assert_eq!(chain.values(), vec!["a", "b", "c"]);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn append_follows_link_order_not_slot_order() {
        let mut other = Chain::from_tokens([ident("x"), ident("z")]);
        let head = other.head().unwrap();
        other.insert_after(head, ident("y")).unwrap();

        let mut chain = Chain::new();
        chain.append(other);
        assert_eq!(chain.values(), vec!["x", "y", "z"]);
    }

    #[test]
    fn insert_after_keeps_remainder() {
        let mut chain = Chain::from_tokens([ident("a"), ident("c")]);
        let head = chain.head().unwrap();
        let b = chain.insert_after(head, ident("b")).unwrap();
        assert_eq!(chain.values(), vec!["a", "b", "c"]);
        assert_eq!(chain.get(b).unwrap().prev(), Some(head));

        let tail = chain.tail().unwrap();
        chain.insert_after(tail, ident("d")).unwrap();
        assert_eq!(chain.values(), vec!["a", "b", "c", "d"]);
        assert_eq!(chain.get(chain.tail().unwrap()).unwrap().value(), "d");
    }

    #[test]
    fn replace_returns_new_id_and_relinks() {
        let mut chain = Chain::from_tokens([ident("a"), ident("b"), ident("c")]);
        let head = chain.head().unwrap();
        let b = chain.get(head).unwrap().next().unwrap();
        let replaced = chain.replace(b, ident("B")).unwrap();

        assert_ne!(replaced, b);
        assert_eq!(chain.values(), vec!["a", "B", "c"]);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.get(b).unwrap().next(), None);
        assert!(chain.replace(b, ident("again")).is_err());

        let new_head = chain.replace(head, ident("A")).unwrap();
        assert_eq!(chain.head(), Some(new_head));
        let tail = chain.tail().unwrap();
        let new_tail = chain.replace(tail, ident("C")).unwrap();
        assert_eq!(chain.tail(), Some(new_tail));
        assert_eq!(chain.values(), vec!["A", "B", "C"]);
    }

    #[test]
    fn wrap_adds_parenthesis_pair() {
        let mut chain = Chain::of(ident("a"));
        chain.wrap(
            Token::synthetic("(", TokenKind::OpenParenthesis),
            Token::synthetic(")", TokenKind::CloseParenthesis),
        );
        assert_eq!(chain.values(), vec!["(", "a", ")"]);
    }

    #[test]
    fn walk_detects_cycle() {
        let mut chain = Chain::from_tokens([ident("a"), ident("b")]);
        let head = chain.head().unwrap();
        let tail = chain.tail().unwrap();
        chain.link_unchecked(tail, head);

        let err = chain.walk().unwrap_err();
        assert!(err.is_malformed_chain());
        // The plain iterator must still terminate.
        assert!(chain.iter().count() <= chain.slots());
    }

    #[test]
    fn walk_detects_dangling_link() {
        let mut chain = Chain::of(ident("a"));
        let head = chain.head().unwrap();
        chain.link_unchecked(head, TokenId(42));
        assert!(chain.walk().unwrap_err().is_malformed_chain());
    }

    #[test]
    fn synthetic_tokens_have_no_position() {
        assert!(Token::keyword(TokenKind::Select).is_synthetic());
        assert_eq!(Token::new("a", TokenKind::Identifier, 7).position(), Some(7));
        assert_eq!(Token::keyword(TokenKind::Select).value(), "SELECT");
    }
}
