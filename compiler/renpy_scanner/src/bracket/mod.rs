//! Bracket depth tracking.
//!
//! Open brackets make line breaks cosmetic: while the stack is non-empty the
//! scanner emits no newline, indent or dedent tokens. The stack also backs
//! closing-bracket validation, so a stray closer is refused rather than
//! silently popping an unrelated bracket.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::token::TokenKind;

/// Kind of bracket on the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketKind {
    /// `(` `)`
    Paren,
    /// `[` `]`
    Square,
    /// `{` `}`
    Brace,
}

impl BracketKind {
    /// Bracket opened by `byte`, if it is an opening bracket.
    pub const fn from_opener(byte: u8) -> Option<Self> {
        match byte {
            b'(' => Some(Self::Paren),
            b'[' => Some(Self::Square),
            b'{' => Some(Self::Brace),
            _ => None,
        }
    }

    /// Bracket closed by `byte`, if it is a closing bracket.
    pub const fn from_closer(byte: u8) -> Option<Self> {
        match byte {
            b')' => Some(Self::Paren),
            b']' => Some(Self::Square),
            b'}' => Some(Self::Brace),
            _ => None,
        }
    }

    pub const fn opener(self) -> u8 {
        match self {
            Self::Paren => b'(',
            Self::Square => b'[',
            Self::Brace => b'{',
        }
    }

    pub const fn closer(self) -> u8 {
        match self {
            Self::Paren => b')',
            Self::Square => b']',
            Self::Brace => b'}',
        }
    }

    pub const fn open_token(self) -> TokenKind {
        match self {
            Self::Paren => TokenKind::OpenParen,
            Self::Square => TokenKind::OpenBracket,
            Self::Brace => TokenKind::OpenBrace,
        }
    }

    pub const fn close_token(self) -> TokenKind {
        match self {
            Self::Paren => TokenKind::CloseParen,
            Self::Square => TokenKind::CloseBracket,
            Self::Brace => TokenKind::CloseBrace,
        }
    }
}

impl std::fmt::Display for BracketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", char::from(self.closer()))
    }
}

/// A closer that does not match the innermost open bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BracketMismatch {
    /// Innermost open bracket, or `None` if nothing is open.
    pub expected: Option<BracketKind>,
    pub found: BracketKind,
}

/// Stack of currently open brackets, innermost last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BracketStack {
    open: SmallVec<[BracketKind; 8]>,
}

impl BracketStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a stack from its bottom-to-top contents.
    pub fn from_kinds(kinds: &[BracketKind]) -> Self {
        Self {
            open: SmallVec::from_slice(kinds),
        }
    }

    #[inline]
    pub fn open(&mut self, kind: BracketKind) {
        self.open.push(kind);
    }

    /// Pop `kind` if it is the innermost open bracket.
    ///
    /// On mismatch the stack is left untouched.
    pub fn close(&mut self, kind: BracketKind) -> Result<(), BracketMismatch> {
        match self.open.last() {
            Some(&top) if top == kind => {
                self.open.pop();
                Ok(())
            }
            top => Err(BracketMismatch {
                expected: top.copied(),
                found: kind,
            }),
        }
    }

    /// Number of unmatched open brackets.
    #[inline]
    pub fn depth(&self) -> u32 {
        u32::try_from(self.open.len()).unwrap_or(u32::MAX)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    #[inline]
    pub fn top(&self) -> Option<BracketKind> {
        self.open.last().copied()
    }

    /// Discard every bracket above `depth`.
    pub fn truncate(&mut self, depth: u32) {
        self.open.truncate(depth as usize);
    }

    pub fn as_slice(&self) -> &[BracketKind] {
        &self.open
    }
}
