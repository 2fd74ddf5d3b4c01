use crate::{Cursor, SourceBuffer};

// === Basic Navigation ===

#[test]
fn current_returns_first_byte() {
    let buf = SourceBuffer::new("abc");
    let cursor = buf.cursor();
    assert_eq!(cursor.current(), b'a');
}

#[test]
fn advance_moves_forward() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), b'b');
    assert_eq!(cursor.pos(), 1);
}

#[test]
fn advance_n_stops_at_sentinel() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    cursor.advance_n(10);
    assert_eq!(cursor.pos(), 3);
    assert!(cursor.is_eof());
    cursor.advance();
    assert_eq!(cursor.pos(), 3);
}

// === Peek ===

#[test]
fn peek_and_peek2() {
    let buf = SourceBuffer::new("abc");
    let cursor = buf.cursor();
    assert_eq!(cursor.peek(), b'b');
    assert_eq!(cursor.peek2(), b'c');
}

#[test]
fn peek_near_end_returns_sentinel() {
    let buf = SourceBuffer::new("a");
    let cursor = buf.cursor();
    assert_eq!(cursor.peek(), 0);
    assert_eq!(cursor.peek2(), 0);
    assert_eq!(cursor.byte_at(10_000), 0);
}

// === EOF Detection ===

#[test]
fn is_eof_on_empty_source() {
    let buf = SourceBuffer::new("");
    assert!(buf.cursor().is_eof());
}

#[test]
fn interior_null_is_not_eof() {
    let buf = SourceBuffer::new("a\0b");
    let mut cursor = buf.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
}

// === Line breaks ===

#[test]
fn eat_line_break_variants() {
    for (source, consumed) in [("\nx", 1), ("\r\nx", 2), ("\rx", 1), ("x", 0)] {
        let buf = SourceBuffer::new(source);
        let mut cursor = buf.cursor();
        cursor.eat_line_break();
        assert_eq!(cursor.pos(), consumed, "for {source:?}");
    }
}

#[test]
fn at_line_break_is_false_at_eof() {
    let buf = SourceBuffer::new("");
    assert!(!buf.cursor().at_line_break());
}

#[test]
fn eat_until_line_break_stops_before_break() {
    let buf = SourceBuffer::new("# comment\nnext");
    let mut cursor = buf.cursor();
    cursor.eat_until_line_break_or_eof();
    assert_eq!(cursor.pos(), 9);
    assert_eq!(cursor.current(), b'\n');
}

#[test]
fn eat_until_line_break_reaches_eof() {
    let buf = SourceBuffer::new("# trailing");
    let mut cursor = buf.cursor();
    cursor.eat_until_line_break_or_eof();
    assert!(cursor.is_eof());
}

#[test]
fn line_start_finds_previous_break() {
    let buf = SourceBuffer::new("label a:\n    jump b\r\n  x");
    assert_eq!(buf.cursor_at(3).line_start(), 0);
    assert_eq!(buf.cursor_at(13).line_start(), 9);
    assert_eq!(buf.cursor_at(23).line_start(), 21);
}

// === Slicing ===

#[test]
fn slice_returns_range_text() {
    let buf = SourceBuffer::new("scene bg room");
    let cursor = buf.cursor();
    assert_eq!(cursor.slice(6, 8), "bg");
    assert_eq!(cursor.slice(0, 5), "scene");
}

#[test]
fn slice_off_boundary_is_empty() {
    let buf = SourceBuffer::new("\u{e9}");
    assert_eq!(buf.cursor().slice(0, 1), "");
}

#[test]
fn starts_with_respects_source_end() {
    let buf = SourceBuffer::new("except");
    let cursor = buf.cursor();
    assert!(cursor.starts_with(b"except"));
    assert!(!cursor.starts_with(b"exception"));
}

// === UTF-8 ===

#[test]
fn advance_char_multibyte() {
    let buf = SourceBuffer::new("\u{1F600}x");
    let mut cursor = buf.cursor();
    assert_eq!(Cursor::utf8_char_width(cursor.current()), 4);
    cursor.advance_char();
    assert_eq!(cursor.pos(), 4);
    assert_eq!(cursor.current(), b'x');
}

#[test]
fn char_boundary_floor_backs_off_continuation_bytes() {
    // 'é' is C3 A9; position 2 is inside it.
    let buf = SourceBuffer::new("a\u{e9}b");
    let cursor = buf.cursor();
    assert_eq!(cursor.char_boundary_floor(2), 1);
    assert_eq!(cursor.char_boundary_floor(3), 3);
    assert_eq!(cursor.char_boundary_floor(99), 4);
}

// === String delimiter search ===

#[test]
fn skip_to_string_delim_finds_each_delimiter() {
    let cases = [
        ("abc\"", b'"'),
        ("ab\\\"", b'\\'),
        ("ab[x]", b'['),
        ("ab\ncd", b'\n'),
        ("ab\rcd", b'\r'),
    ];
    for (source, expected) in cases {
        let buf = SourceBuffer::new(source);
        let mut cursor = buf.cursor();
        let found = cursor.skip_to_string_delim(b'"', b'[', u32::MAX);
        assert_eq!(found, Some(expected), "for {source:?}");
    }
}

#[test]
fn skip_to_string_delim_ignores_other_quote() {
    let buf = SourceBuffer::new("it's\"");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_string_delim(b'"', b'[', u32::MAX), Some(b'"'));
    assert_eq!(cursor.pos(), 4);
}

#[test]
fn skip_to_string_delim_respects_limit() {
    let buf = SourceBuffer::new("abcdef\"");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_string_delim(b'"', b'[', 3), None);
    assert_eq!(cursor.pos(), 3);
}

#[test]
fn skip_to_string_delim_exhausts_at_eof() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_string_delim(b'"', b'[', u32::MAX), None);
    assert!(cursor.is_eof());
}

// === Predicates ===

#[test]
fn eat_while_stops_at_first_mismatch() {
    let buf = SourceBuffer::new(" \t  x");
    let mut cursor = buf.cursor();
    cursor.eat_while(|b| b == b' ' || b == b'\t');
    assert_eq!(cursor.current(), b'x');
}

#[test]
fn eat_while_stops_at_eof() {
    let buf = SourceBuffer::new("aaa");
    let mut cursor = buf.cursor();
    cursor.eat_while(|b| b == b'a');
    assert!(cursor.is_eof());
}
