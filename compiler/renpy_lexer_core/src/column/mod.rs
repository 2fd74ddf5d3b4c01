//! Indentation column computation.
//!
//! Converts the leading whitespace of a physical line into the column the
//! indentation machinery compares against its stack.
//!
//! | Byte(s) | Effect on column |
//! |---|---|
//! | space | `+1` |
//! | tab | advance to the next multiple of the tab width |
//! | form feed | reset to `0` |
//! | Unicode space separator | none (whitespace, zero width) |
//!
//! Lines that are blank or whose first significant character is the comment
//! marker `#` produce no column at all: they never open, continue or close
//! a block.

/// Tab stop used when no explicit width is configured.
pub const DEFAULT_TAB_WIDTH: u32 = 8;

/// Length in bytes of the Unicode space separator at the start of `bytes`.
///
/// Recognizes the zero-width characters the grammar lists as extras
/// (U+FEFF, U+2060, U+200B) and the non-ASCII separators matched by a `\s`
/// class (U+00A0, U+1680, U+2000..=U+200A, U+2028, U+2029, U+202F, U+205F,
/// U+3000). Returns `0` if `bytes` does not start with one.
pub fn space_separator_len(bytes: &[u8]) -> usize {
    match bytes {
        // U+00A0
        [0xC2, 0xA0, ..] => 2,
        // U+1680
        [0xE1, 0x9A, 0x80, ..] => 3,
        // U+2000..=U+200B, U+2028, U+2029, U+202F
        [0xE2, 0x80, 0x80..=0x8B | 0xA8 | 0xA9 | 0xAF, ..] => 3,
        // U+205F, U+2060
        [0xE2, 0x81, 0x9F | 0xA0, ..] => 3,
        // U+3000
        [0xE3, 0x80, 0x80, ..] => 3,
        // U+FEFF
        [0xEF, 0xBB, 0xBF, ..] => 3,
        _ => 0,
    }
}

/// Column of the first significant character of `line`.
///
/// `line` starts at the beginning of a physical line; it may extend past
/// the line break, which terminates the scan. Returns `None` for blank
/// lines and comment-only lines.
///
/// A `tab_width` of `0` is treated as `1`.
pub fn indent_column(line: &[u8], tab_width: u32) -> Option<u32> {
    let tab_width = tab_width.max(1);
    let mut column: u32 = 0;
    let mut i = 0;
    while i < line.len() {
        match line[i] {
            b' ' => {
                column += 1;
                i += 1;
            }
            b'\t' => {
                column = (column / tab_width + 1) * tab_width;
                i += 1;
            }
            b'\x0C' => {
                column = 0;
                i += 1;
            }
            b'\n' | b'\r' | b'#' => return None,
            _ => {
                let len = space_separator_len(&line[i..]);
                if len == 0 {
                    return Some(column);
                }
                i += len;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests;
