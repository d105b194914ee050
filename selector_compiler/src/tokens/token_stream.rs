//! Ordered token buffer shared by the scanner and the parser
//!
//! The scanner appends at the back, the parser consumes from the front.
//! Consumption is destructive: there are no checkpoints and no rewinding.

use super::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    /// Token at `position` from the front without consuming it
    pub fn get(&self, position: usize) -> Option<&Token> {
        self.tokens.get(position)
    }

    pub fn front(&self) -> Option<&Token> {
        self.tokens.front()
    }

    pub fn pop_front(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Remove and return the first `count` tokens (fewer if the stream is shorter)
    pub fn drain_front(&mut self, count: usize) -> Vec<Token> {
        let count = count.min(self.tokens.len());
        self.tokens.drain(..count).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|token| token.kind).collect()
    }

    /// One rendered token per line
    pub fn render(&self) -> String {
        self.tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens.into()
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::collections::vec_deque::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::collections::vec_deque::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
