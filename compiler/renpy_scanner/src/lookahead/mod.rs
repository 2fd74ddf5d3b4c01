//! Disambiguation lookahead.
//!
//! Short, bounded peeks that decide whether the bytes at the cursor are a
//! structural token: a closing bracket that matches the open bracket, or a
//! keyword the grammar cannot tell apart from an identifier on its own.

use renpy_lexer_core::Cursor;

use crate::bracket::{BracketKind, BracketMismatch, BracketStack};

const EXCEPT: &[u8] = b"except";

/// Identifier continuation test, `0x00` excluded so the sentinel never
/// extends a word. Non-ASCII bytes count as identifier bytes.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | 0x80..=0xFF
        );
        i += 1;
    }
    table
};

/// Returns `true` if `b` can continue an identifier.
#[inline]
pub fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// Check a closing bracket at the cursor against the open brackets.
///
/// Returns `None` if the cursor is not at a closer. Otherwise the closer's
/// kind if it matches the innermost open bracket, or the mismatch. Nothing
/// is consumed and the stack is not modified.
pub fn closing_bracket(
    cursor: &Cursor<'_>,
    brackets: &BracketStack,
) -> Option<Result<BracketKind, BracketMismatch>> {
    let found = BracketKind::from_closer(cursor.current())?;
    Some(match brackets.top() {
        Some(top) if top == found => Ok(found),
        expected => Err(BracketMismatch { expected, found }),
    })
}

/// Returns `true` if the cursor is at the whole word `except`.
///
/// Both ends need an identifier boundary, so `exception` and `my_except`
/// do not match.
pub fn at_except(cursor: &Cursor<'_>) -> bool {
    if !cursor.starts_with(EXCEPT) {
        return false;
    }
    let pos = cursor.pos();
    let before_ok = pos == 0 || !is_ident_continue(cursor.byte_at(pos - 1));
    before_ok && !is_ident_continue(cursor.byte_at(pos + EXCEPT_LEN))
}

/// Length of the `except` keyword in bytes.
#[allow(
    clippy::cast_possible_truncation,
    reason = "keyword length is a small constant"
)]
pub const EXCEPT_LEN: u32 = EXCEPT.len() as u32;

#[cfg(test)]
mod tests;
