//! Byte-level building blocks for the Ren'Py external scanner.
//!
//! - [`SourceBuffer`]: owned, sentinel-terminated copy of the source text.
//! - [`Cursor`]: `Copy` read head over the buffer with bounded lookahead.
//! - [`column`]: indentation column computation (tab expansion, Unicode
//!   space separators, blank and comment-only line detection).
//!
//! Nothing in this crate knows about tokens. The scanner crate builds the
//! structural token stream on top of these primitives.

mod cursor;
mod source_buffer;

pub mod column;

pub use column::{indent_column, space_separator_len, DEFAULT_TAB_WIDTH};
pub use cursor::Cursor;
pub use source_buffer::SourceBuffer;
