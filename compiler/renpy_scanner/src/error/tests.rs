use super::*;

#[test]
fn indentation_mismatch_message() {
    let kind = ScanErrorKind::IndentationMismatch {
        column: 2,
        nearest: 0,
    };
    assert_eq!(
        kind.to_string(),
        "unindent to column 2 does not match any outer indentation level (nearest is 0)"
    );
}

#[test]
fn bracket_mismatch_messages() {
    let mismatched = ScanErrorKind::BracketMismatch {
        expected: Some(BracketKind::Paren),
        found: BracketKind::Square,
    };
    assert_eq!(
        mismatched.to_string(),
        "mismatched closing bracket `]`, expected `)`"
    );

    let unmatched = ScanErrorKind::BracketMismatch {
        expected: None,
        found: BracketKind::Brace,
    };
    assert_eq!(unmatched.to_string(), "unmatched closing bracket `}`");
}

#[test]
fn unterminated_string_message() {
    let kind = ScanErrorKind::UnterminatedString { quote: '"' };
    assert_eq!(
        kind.to_string(),
        "unterminated string literal (missing closing '\"')"
    );
}

#[test]
fn located_error_message() {
    let err = ScanError::new(Span::new(4, 4), ScanErrorKind::UnterminatedInterpolation);
    assert_eq!(
        err.to_string(),
        "unterminated interpolation in string literal at 4..4"
    );
}

#[test]
fn converts_from_bracket_mismatch() {
    let kind: ScanErrorKind = BracketMismatch {
        expected: None,
        found: BracketKind::Paren,
    }
    .into();
    assert!(matches!(
        kind,
        ScanErrorKind::BracketMismatch {
            expected: None,
            found: BracketKind::Paren
        }
    ));
}
