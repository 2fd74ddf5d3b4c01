//! Incremental external scanner for Ren'Py scripts.
//!
//! Produces the structural tokens a declarative grammar cannot express on
//! its own: logical newlines, indentation changes, string boundaries with
//! interpolation markers, bracket tokens, and the `except` keyword. The
//! grammar lexes everything else.
//!
//! # Usage
//!
//! A host calls [`Scanner::scan`] once per token with the set of token kinds
//! it can accept, and saves [`Scanner::serialize`] output after every token
//! so a later re-scan can resume there. [`Tokenizer`] is such a host, used
//! for testing and for tools that want the structural stream directly.
//!
//! ```
//! use renpy_scanner::{tokenize, LexemeKind, TokenKind};
//!
//! let out = tokenize("label start:\n    \"Hello, [player]!\"\n");
//! assert!(out.errors.is_empty());
//! assert!(out
//!     .lexemes
//!     .iter()
//!     .any(|l| l.kind == LexemeKind::External(TokenKind::InterpolationEscape)));
//! ```

mod bracket;
mod config;
mod driver;
mod error;
mod indent;
mod lookahead;
mod scanner;
mod state;
mod string;
mod token;

pub use bracket::{BracketKind, BracketMismatch, BracketStack};
pub use config::{ScannerConfig, MAX_CHUNK_LEN, MAX_STATE_LEN};
pub use driver::{tokenize, tokenize_with, Checkpoint, Lexeme, LexemeKind, Tokenized, Tokenizer};
pub use error::{ScanError, ScanErrorKind};
pub use indent::{IndentStack, Transition};
pub use scanner::Scanner;
pub use state::{ScannerState, StateError, FORMAT_VERSION};
pub use string::{Delimiter, StringStack};
pub use token::{Span, Token, TokenKind, ValidTokens};
