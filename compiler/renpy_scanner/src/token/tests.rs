use super::*;

#[test]
fn kind_discriminants_index_valid_bits() {
    for kind in TokenKind::ALL {
        assert_eq!(kind.flag().bits(), 1 << (kind as u16), "{kind}");
    }
    assert_eq!(TokenKind::Newline.flag(), ValidTokens::NEWLINE);
    assert_eq!(TokenKind::Except.flag(), ValidTokens::EXCEPT);
    assert_eq!(TokenKind::OpenBrace.flag(), ValidTokens::OPEN_BRACE);
}

#[test]
fn all_kinds_cover_all_flags() {
    let union = TokenKind::ALL
        .iter()
        .fold(ValidTokens::empty(), |acc, kind| acc | kind.flag());
    assert_eq!(union, ValidTokens::all());
}

#[test]
fn kind_is_one_byte() {
    assert_eq!(std::mem::size_of::<TokenKind>(), 1);
}

#[test]
fn accepts_checks_membership() {
    let valid = ValidTokens::NEWLINE | ValidTokens::EXCEPT;
    assert!(valid.accepts(TokenKind::Newline));
    assert!(valid.accepts(TokenKind::Except));
    assert!(!valid.accepts(TokenKind::Indent));
}

#[test]
fn default_valid_set_is_everything() {
    assert_eq!(ValidTokens::default(), ValidTokens::all());
}

#[test]
fn layout_kinds() {
    let layout: Vec<_> = TokenKind::ALL.into_iter().filter(|k| k.is_layout()).collect();
    assert_eq!(
        layout,
        [TokenKind::Newline, TokenKind::Indent, TokenKind::Dedent]
    );
}

#[test]
fn span_helpers() {
    let span = Span::new(3, 7);
    assert_eq!(span.len(), 4);
    assert!(!span.is_empty());
    assert!(Span::empty_at(5).is_empty());
}

#[test]
fn display_uses_name() {
    assert_eq!(TokenKind::StringStart.to_string(), "STRING_START");
    assert_eq!(TokenKind::CloseParen.to_string(), ")");
}
