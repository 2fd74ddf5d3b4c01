use renpy_lexer_core::SourceBuffer;

use super::*;

fn except_at(source: &str, pos: u32) -> bool {
    let buf = SourceBuffer::new(source);
    at_except(&buf.cursor_at(pos))
}

#[test]
fn except_whole_word() {
    assert!(except_at("except:", 0));
    assert!(except_at("except ValueError:", 0));
    assert!(except_at("except", 0));
    assert!(except_at("    except:", 4));
}

#[test]
fn except_needs_boundaries() {
    assert!(!except_at("exception", 0));
    assert!(!except_at("except_", 0));
    assert!(!except_at("my_except", 3));
    assert!(!except_at("except1", 0));
    assert!(!except_at("excepté", 0));
    assert!(!except_at("exce", 0));
}

#[test]
fn closer_matching_top() {
    let buf = SourceBuffer::new(")");
    let brackets = BracketStack::from_kinds(&[BracketKind::Square, BracketKind::Paren]);
    assert_eq!(
        closing_bracket(&buf.cursor(), &brackets),
        Some(Ok(BracketKind::Paren))
    );
}

#[test]
fn closer_not_matching_top() {
    let buf = SourceBuffer::new("]");
    let brackets = BracketStack::from_kinds(&[BracketKind::Paren]);
    assert_eq!(
        closing_bracket(&buf.cursor(), &brackets),
        Some(Err(BracketMismatch {
            expected: Some(BracketKind::Paren),
            found: BracketKind::Square,
        }))
    );
}

#[test]
fn closer_with_nothing_open() {
    let buf = SourceBuffer::new("}");
    assert_eq!(
        closing_bracket(&buf.cursor(), &BracketStack::new()),
        Some(Err(BracketMismatch {
            expected: None,
            found: BracketKind::Brace,
        }))
    );
}

#[test]
fn non_closer_is_none() {
    let buf = SourceBuffer::new("(");
    assert_eq!(closing_bracket(&buf.cursor(), &BracketStack::new()), None);
}

#[test]
fn ident_table() {
    assert!(is_ident_continue(b'a'));
    assert!(is_ident_continue(b'_'));
    assert!(is_ident_continue(b'9'));
    assert!(is_ident_continue(0xC3));
    assert!(!is_ident_continue(0));
    assert!(!is_ident_continue(b':'));
    assert!(!is_ident_continue(b' '));
}
