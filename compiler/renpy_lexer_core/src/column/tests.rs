use super::*;

fn col(line: &str) -> Option<u32> {
    indent_column(line.as_bytes(), DEFAULT_TAB_WIDTH)
}

// === Spaces and tabs ===

#[test]
fn no_indentation() {
    assert_eq!(col("label start:"), Some(0));
}

#[test]
fn spaces_count_one_each() {
    assert_eq!(col("    jump end"), Some(4));
}

#[test]
fn tab_expands_to_next_stop() {
    assert_eq!(col("\tx"), Some(8));
    assert_eq!(col("   \tx"), Some(8));
    assert_eq!(col("\t\tx"), Some(16));
    assert_eq!(col("\t x"), Some(9));
}

#[test]
fn custom_tab_width() {
    assert_eq!(indent_column(b"\tx", 4), Some(4));
    assert_eq!(indent_column(b"  \tx", 4), Some(4));
    assert_eq!(indent_column(b"    \tx", 4), Some(8));
}

#[test]
fn zero_tab_width_acts_as_one() {
    assert_eq!(indent_column(b"\t\tx", 0), Some(2));
}

#[test]
fn form_feed_resets_column() {
    assert_eq!(col("    \x0C  x"), Some(2));
}

// === Unicode separators ===

#[test]
fn zero_width_separators_do_not_count() {
    assert_eq!(col("\u{FEFF}label start:"), Some(0));
    assert_eq!(col("  \u{200B}  x"), Some(4));
    assert_eq!(col("\u{2060}x"), Some(0));
}

#[test]
fn wide_separators_do_not_count() {
    assert_eq!(col("\u{3000}x"), Some(0));
    assert_eq!(col(" \u{a0} x"), Some(2));
}

#[test]
fn separator_lengths() {
    assert_eq!(space_separator_len("\u{a0}".as_bytes()), 2);
    assert_eq!(space_separator_len("\u{1680}".as_bytes()), 3);
    assert_eq!(space_separator_len("\u{2005}".as_bytes()), 3);
    assert_eq!(space_separator_len("\u{2029}".as_bytes()), 3);
    assert_eq!(space_separator_len("\u{202F}".as_bytes()), 3);
    assert_eq!(space_separator_len("\u{205F}".as_bytes()), 3);
    assert_eq!(space_separator_len("\u{FEFF}".as_bytes()), 3);
    assert_eq!(space_separator_len(b"x"), 0);
    assert_eq!(space_separator_len("\u{e9}".as_bytes()), 0);
    assert_eq!(space_separator_len(b""), 0);
}

// === Lines without a decision ===

#[test]
fn blank_lines_have_no_column() {
    assert_eq!(col(""), None);
    assert_eq!(col("    "), None);
    assert_eq!(col("  \t\n"), None);
    assert_eq!(col("   \r\n"), None);
}

#[test]
fn comment_lines_have_no_column() {
    assert_eq!(col("# a comment"), None);
    assert_eq!(col("        # indented comment"), None);
}

#[test]
fn line_break_ends_the_scan() {
    assert_eq!(col("  \n    x"), None);
}

#[test]
fn interior_null_is_significant() {
    assert_eq!(col("  \0"), Some(2));
}

mod proptest_columns {
    use super::super::indent_column;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn spaces_only_column_is_count(spaces in 0usize..200) {
            let line = format!("{}x", " ".repeat(spaces));
            prop_assert_eq!(indent_column(line.as_bytes(), 8), Some(spaces as u32));
        }

        #[test]
        fn tab_columns_land_on_tab_stops(
            prefix in proptest::collection::vec(prop_oneof![Just(b' '), Just(b'\t')], 0..40),
            tab_width in 1u32..16,
        ) {
            let mut line = prefix;
            line.push(b'\t');
            line.push(b'x');
            let column = indent_column(&line, tab_width);
            prop_assert!(matches!(column, Some(c) if c % tab_width == 0 && c > 0));
        }
    }
}
