//! String literal sub-automaton.
//!
//! A string is tokenized as `STRING_START`, any number of `STRING_CONTENT`
//! chunks interleaved with `INTERPOLATION` markers, and `STRING_END`.
//!
//! ```text
//! "Hello, [player]!\n"
//! ^ start
//!  ^^^^^^^ content
//!         ^ interpolation (opens a `[` on the bracket stack)
//!          ^^^^^^ expression text, lexed by the grammar
//!                ^ `]` closes the bracket, content mode resumes
//!                 ^^^ content
//!                    ^ end
//! ```
//!
//! Open strings live on a [`StringStack`]. Each [`Delimiter`] remembers the
//! bracket depth it was opened at; the string is in *content mode* only while
//! the bracket depth equals that depth, so the text of an interpolation
//! (which may itself contain strings) is scanned as ordinary input.

use renpy_lexer_core::Cursor;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An open string literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delimiter {
    /// Opening quote byte (`"` or `'`).
    pub quote: u8,
    /// Opened with three quotes; may span lines.
    pub triple: bool,
    /// The previous chunk ended right after a backslash; the next
    /// character is literal.
    pub escape_armed: bool,
    /// Bracket depth when the string was opened.
    pub depth: u32,
}

impl Delimiter {
    /// Length in bytes of the opening and closing delimiter.
    #[inline]
    pub const fn quote_len(&self) -> u32 {
        if self.triple {
            3
        } else {
            1
        }
    }

    #[inline]
    pub fn quote_char(&self) -> char {
        char::from(self.quote)
    }
}

/// Open strings, innermost last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringStack {
    open: SmallVec<[Delimiter; 4]>,
}

impl StringStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_delimiters(delimiters: &[Delimiter]) -> Self {
        Self {
            open: SmallVec::from_slice(delimiters),
        }
    }

    #[inline]
    pub fn push(&mut self, delimiter: Delimiter) {
        self.open.push(delimiter);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Delimiter> {
        self.open.pop()
    }

    #[inline]
    pub fn top(&self) -> Option<&Delimiter> {
        self.open.last()
    }

    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut Delimiter> {
        self.open.last_mut()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn as_slice(&self) -> &[Delimiter] {
        &self.open
    }

    /// Returns `true` if the innermost string is in content mode at
    /// `bracket_depth`.
    #[inline]
    pub fn in_content(&self, bracket_depth: u32) -> bool {
        self.top().is_some_and(|d| d.depth == bracket_depth)
    }
}

/// Consume an opening quote and return its delimiter.
///
/// Returns `None` (consuming nothing) if the cursor is not at a quote.
pub fn scan_string_start(cursor: &mut Cursor<'_>, depth: u32) -> Option<Delimiter> {
    let quote = cursor.current();
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let triple = cursor.peek() == quote && cursor.peek2() == quote;
    let delimiter = Delimiter {
        quote,
        triple,
        escape_armed: false,
        depth,
    };
    cursor.advance_n(delimiter.quote_len());
    Some(delimiter)
}

/// What a content-mode step found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringEvent {
    /// Literal text from the entry position to the cursor.
    Content,
    /// The interpolation trigger was consumed.
    Interpolation,
    /// The closing delimiter was consumed.
    End,
    /// A line break (single-line strings) or end of input; nothing consumed.
    Unterminated,
}

/// Scan one step of string content.
///
/// Content chunks stop before the closing delimiter, before an unescaped
/// interpolation trigger, and before a line break in a single-line string,
/// so the delimiter-level events are always reported by a separate call with
/// nothing consumed ahead of them. A chunk never exceeds `max_chunk` bytes
/// (rounded down to a character boundary), except that a chunk always makes
/// progress: a first character or doubled trigger wider than the cap is
/// taken whole. When the cap falls right after a backslash, `escape_armed`
/// is set so the next call treats the following character literally.
pub fn scan_content(
    cursor: &mut Cursor<'_>,
    delimiter: &mut Delimiter,
    trigger: u8,
    max_chunk: u32,
) -> StringEvent {
    let start = cursor.pos();
    let limit = window_end(cursor, start, max_chunk);

    if delimiter.escape_armed && !cursor.is_eof() {
        eat_escaped_char(cursor);
        delimiter.escape_armed = false;
    }

    loop {
        let Some(byte) = cursor.skip_to_string_delim(delimiter.quote, trigger, limit) else {
            // Window exhausted: either the chunk cap or end of input.
            return if cursor.pos() > start {
                StringEvent::Content
            } else {
                StringEvent::Unterminated
            };
        };

        match byte {
            b'\\' => {
                cursor.advance();
                if cursor.is_eof() {
                    return StringEvent::Content;
                }
                if cursor.pos() >= limit {
                    delimiter.escape_armed = true;
                    return StringEvent::Content;
                }
                eat_escaped_char(cursor);
            }
            b if b == trigger => {
                if cursor.peek() == trigger {
                    // Doubled trigger is a literal bracket and is never split.
                    if cursor.pos() + 2 > limit && cursor.pos() > start {
                        return StringEvent::Content;
                    }
                    cursor.advance_n(2);
                    continue;
                }
                if cursor.pos() > start {
                    return StringEvent::Content;
                }
                cursor.advance();
                return StringEvent::Interpolation;
            }
            b if b == delimiter.quote => {
                let closes = !delimiter.triple
                    || (cursor.peek() == delimiter.quote && cursor.peek2() == delimiter.quote);
                if !closes {
                    cursor.advance();
                    continue;
                }
                if cursor.pos() > start {
                    return StringEvent::Content;
                }
                cursor.advance_n(delimiter.quote_len());
                return StringEvent::End;
            }
            b'\n' | b'\r' => {
                if delimiter.triple {
                    cursor.eat_line_break();
                    continue;
                }
                return if cursor.pos() > start {
                    StringEvent::Content
                } else {
                    StringEvent::Unterminated
                };
            }
            _ => cursor.advance(),
        }
    }
}

/// End of the search window for one content chunk.
fn window_end(cursor: &Cursor<'_>, start: u32, max_chunk: u32) -> u32 {
    let limit = cursor.char_boundary_floor(start.saturating_add(max_chunk.max(1)));
    if limit > start || cursor.is_eof() {
        limit
    } else {
        // The cap is narrower than the first character; take it whole.
        start + Cursor::utf8_char_width(cursor.current())
    }
}

/// Consume the character after a backslash, treating `\r\n` as one.
fn eat_escaped_char(cursor: &mut Cursor<'_>) {
    if cursor.at_line_break() {
        cursor.eat_line_break();
    } else {
        cursor.advance_char();
    }
}
