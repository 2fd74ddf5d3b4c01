//! Scanner error types.
//!
//! Every scanner error is recoverable: it rides on the token that surfaces
//! it (or, for a refused closer, is reported by the host) and scanning
//! continues. Errors carry WHERE (`span`) and WHAT (`kind`); the grammar layer
//! decides how to present them.

use thiserror::Error;

use crate::bracket::{BracketKind, BracketMismatch};
use crate::token::Span;

/// What went wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ScanErrorKind {
    /// A dedent landed between two open block columns.
    #[error("unindent to column {column} does not match any outer indentation level (nearest is {nearest})")]
    IndentationMismatch { column: u32, nearest: u32 },

    /// A closing bracket does not match the innermost open bracket.
    #[error("{}", describe_mismatch(*.expected, *.found))]
    BracketMismatch {
        expected: Option<BracketKind>,
        found: BracketKind,
    },

    /// Line break or end of input inside a string literal.
    #[error("unterminated string literal (missing closing {quote:?})")]
    UnterminatedString { quote: char },

    /// Line break or end of input inside a string interpolation.
    #[error("unterminated interpolation in string literal")]
    UnterminatedInterpolation,
}

fn describe_mismatch(expected: Option<BracketKind>, found: BracketKind) -> String {
    match expected {
        Some(open) => format!("mismatched closing bracket {found}, expected {open}"),
        None => format!("unmatched closing bracket {found}"),
    }
}

impl From<BracketMismatch> for ScanErrorKind {
    fn from(mismatch: BracketMismatch) -> Self {
        ScanErrorKind::BracketMismatch {
            expected: mismatch.expected,
            found: mismatch.found,
        }
    }
}

/// A scanner error located in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("{kind} at {}..{}", .span.start, .span.end)]
pub struct ScanError {
    /// WHERE the error occurred.
    pub span: Span,
    /// WHAT went wrong.
    pub kind: ScanErrorKind,
}

impl ScanError {
    pub const fn new(span: Span, kind: ScanErrorKind) -> Self {
        Self { span, kind }
    }
}

#[cfg(test)]
mod tests;
