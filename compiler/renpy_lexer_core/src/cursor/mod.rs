//! Cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. End of input is
//! detected when the current byte equals the sentinel (`0x00`) and the
//! position has reached the source length. Because the cursor is [`Copy`],
//! "mark" and "reset" are a copy and an assignment: the scanner snapshots the
//! cursor before speculative lookahead and restores it when it declines.
//!
//! # Interior Null Bytes
//!
//! A null at `pos < source_len` is an interior null (content);
//! a null at `pos >= source_len` is the sentinel (EOF).

/// Returns the earliest of two optional offsets.
///
/// Combines results from separate memchr calls when more than three needles
/// are involved.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and all bytes after it are `0x00`. This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: &[u8] = 16, u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position (`0x00` at EOF).
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Returns the byte one position ahead of current.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    /// Returns the byte two positions ahead of current.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    /// Byte at an absolute position; `0x00` for anything past the source.
    ///
    /// Reads past the padding are answered with the sentinel value rather
    /// than panicking, so lookahead of any width is safe.
    #[inline]
    pub fn byte_at(&self, pos: u32) -> u8 {
        self.buf.get(pos as usize).copied().unwrap_or(0)
    }

    /// Advance the cursor by one byte. Never moves past the sentinel.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.source_len {
            self.pos += 1;
        }
    }

    /// Advance the cursor by `n` bytes, stopping at the sentinel.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = self.pos.saturating_add(n).min(self.source_len);
    }

    /// Returns `true` if the cursor has reached EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the current byte starts a line break (`\n` or `\r`).
    #[inline]
    pub fn at_line_break(&self) -> bool {
        !self.is_eof() && matches!(self.current(), b'\n' | b'\r')
    }

    /// Consume one line break (`\n`, `\r\n`, or a lone `\r`).
    ///
    /// Does nothing if the cursor is not at a line break.
    pub fn eat_line_break(&mut self) {
        match self.current() {
            b'\r' => {
                self.advance();
                if self.current() == b'\n' {
                    self.advance();
                }
            }
            b'\n' => self.advance(),
            _ => {}
        }
    }

    /// Source bytes in `start..end`, clamped to the source content.
    pub fn bytes(&self, start: u32, end: u32) -> &'a [u8] {
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        &self.buf[start..end]
    }

    /// Source text in `start..end`.
    ///
    /// Returns an empty string if the range does not fall on character
    /// boundaries. Token spans produced by the scanner always do.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        std::str::from_utf8(self.bytes(start, end)).unwrap_or_default()
    }

    /// Returns `true` if the bytes at the current position equal `needle`.
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        let start = self.pos as usize;
        let end = start + needle.len();
        end <= self.source_len as usize && &self.buf[start..end] == needle
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`, so the sentinel terminates the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Advance to the next line break or EOF.
    ///
    /// Used by the comment scanner to skip comment bodies. The line break
    /// itself is not consumed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_line_break_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr2(b'\n', b'\r', remaining) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Advance past ordinary string content to the next interesting byte.
    ///
    /// "Interesting" bytes are the closing `quote`, `\`, the interpolation
    /// `trigger`, `\n`, and `\r`. The search never goes past `limit`
    /// (clamped to the source length). Returns the byte found, or `None`
    /// if the window was exhausted first; the cursor is then at the end of
    /// the window.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "window length <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8, trigger: u8, limit: u32) -> Option<u8> {
        let end = limit.min(self.source_len).max(self.pos);
        let window = &self.buf[self.pos as usize..end as usize];
        let primary = memchr::memchr3(quote, b'\\', trigger, window);
        let line_break = memchr::memchr2(b'\n', b'\r', window);
        match earliest_of(primary, line_break) {
            Some(offset) => {
                self.pos += offset as u32;
                Some(self.current())
            }
            None => {
                self.pos = end;
                None
            }
        }
    }

    /// Byte offset of the start of the physical line containing the cursor.
    ///
    /// Searches backwards for the previous `\n` (or lone `\r`).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < pos which fits in u32"
    )]
    pub fn line_start(&self) -> u32 {
        let before = &self.buf[..self.pos as usize];
        match memchr::memrchr2(b'\n', b'\r', before) {
            Some(offset) => offset as u32 + 1,
            None => 0,
        }
    }

    /// Largest character boundary at or before `pos`.
    pub fn char_boundary_floor(&self, pos: u32) -> u32 {
        let mut pos = pos.min(self.source_len);
        while pos > self.pos && (self.byte_at(pos) & 0xC0) == 0x80 {
            pos -= 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests;
