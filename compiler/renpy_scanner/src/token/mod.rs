//! Token kinds produced by the external scanner.
//!
//! The scanner only produces the structural tokens the declarative grammar
//! cannot express itself. Everything else (identifiers, numbers, operators,
//! keywords other than `except`) is lexed by the grammar.

use bitflags::bitflags;

use crate::error::ScanErrorKind;

/// Half-open byte range `start..end` in the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    #[inline]
    pub const fn empty_at(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Kind of an externally scanned token.
///
/// Discriminants are stable; they index [`ValidTokens`] bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// End of a logical line (bracket depth 0).
    Newline = 0,
    /// Start of a more deeply indented block.
    Indent = 1,
    /// End of an indented block; one per closed level.
    Dedent = 2,
    /// Opening quote (`"`, `'`, `"""` or `'''`).
    StringStart = 3,
    /// Literal text inside a string, escapes included verbatim.
    StringContent = 4,
    /// Interpolation trigger inside a string (`[` by default).
    InterpolationEscape = 5,
    /// Closing quote, or a zero-width end forced by an unterminated string.
    StringEnd = 6,
    /// `#` comment up to (not including) the line break.
    Comment = 7,
    /// `]` that closes a tracked `[`.
    CloseBracket = 8,
    /// `)` that closes a tracked `(`.
    CloseParen = 9,
    /// `}` that closes a tracked `{`.
    CloseBrace = 10,
    /// The `except` keyword, when the grammar asks for it.
    Except = 11,
    /// `(`
    OpenParen = 12,
    /// `[`
    OpenBracket = 13,
    /// `{`
    OpenBrace = 14,
}

impl TokenKind {
    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; 15] = [
        TokenKind::Newline,
        TokenKind::Indent,
        TokenKind::Dedent,
        TokenKind::StringStart,
        TokenKind::StringContent,
        TokenKind::InterpolationEscape,
        TokenKind::StringEnd,
        TokenKind::Comment,
        TokenKind::CloseBracket,
        TokenKind::CloseParen,
        TokenKind::CloseBrace,
        TokenKind::Except,
        TokenKind::OpenParen,
        TokenKind::OpenBracket,
        TokenKind::OpenBrace,
    ];

    /// Human-readable name used in diagnostics and test output.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::StringStart => "STRING_START",
            TokenKind::StringContent => "STRING_CONTENT",
            TokenKind::InterpolationEscape => "INTERPOLATION",
            TokenKind::StringEnd => "STRING_END",
            TokenKind::Comment => "COMMENT",
            TokenKind::CloseBracket => "]",
            TokenKind::CloseParen => ")",
            TokenKind::CloseBrace => "}",
            TokenKind::Except => "except",
            TokenKind::OpenParen => "(",
            TokenKind::OpenBracket => "[",
            TokenKind::OpenBrace => "{",
        }
    }

    /// Returns `true` for newline, indent and dedent.
    pub const fn is_layout(self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent
        )
    }

    /// The [`ValidTokens`] bit for this kind.
    pub const fn flag(self) -> ValidTokens {
        ValidTokens::from_bits_truncate(1 << self as u16)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Token kinds the grammar currently accepts.
    ///
    /// Passed to every scan call. Structural bookkeeping (brackets,
    /// comments, layout) runs regardless of this set; it only gates
    /// disambiguation that would otherwise steal input from the grammar,
    /// such as the `except` keyword.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct ValidTokens: u16 {
        const NEWLINE = 1 << 0;
        const INDENT = 1 << 1;
        const DEDENT = 1 << 2;
        const STRING_START = 1 << 3;
        const STRING_CONTENT = 1 << 4;
        const INTERPOLATION_ESCAPE = 1 << 5;
        const STRING_END = 1 << 6;
        const COMMENT = 1 << 7;
        const CLOSE_BRACKET = 1 << 8;
        const CLOSE_PAREN = 1 << 9;
        const CLOSE_BRACE = 1 << 10;
        const EXCEPT = 1 << 11;
        const OPEN_PAREN = 1 << 12;
        const OPEN_BRACKET = 1 << 13;
        const OPEN_BRACE = 1 << 14;
    }
}

impl ValidTokens {
    /// Returns `true` if `kind` is in the set.
    #[inline]
    pub const fn accepts(self, kind: TokenKind) -> bool {
        self.contains(kind.flag())
    }
}

impl Default for ValidTokens {
    fn default() -> Self {
        Self::all()
    }
}

/// A token produced by one scan call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Recoverable error surfaced by this token (e.g. a forced string end).
    pub error: Option<ScanErrorKind>,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            error: None,
        }
    }

    #[inline]
    pub const fn with_error(kind: TokenKind, span: Span, error: ScanErrorKind) -> Self {
        Self {
            kind,
            span,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests;
