//! Host-side driver.
//!
//! Stands in for a parser generator's runtime: it asks the external scanner
//! for a token at every position and, when the scanner declines, lexes one
//! opaque lexeme (a word or a single character) the way a grammar's own
//! lexer would. The result is a flat [`Lexeme`] stream interleaving
//! structural tokens with text.
//!
//! After every external token the driver saves a [`Checkpoint`] (offset plus
//! serialized scanner state). [`Tokenizer::resume`] restarts from any of
//! them, which is how an incremental re-parse reuses work before an edit.

use renpy_lexer_core::{space_separator_len, Cursor, SourceBuffer};
use tracing::{debug, trace};

use crate::config::ScannerConfig;
use crate::error::ScanError;
use crate::lookahead::{self, is_ident_continue};
use crate::scanner::Scanner;
use crate::state::StateError;
use crate::token::{Span, Token, TokenKind, ValidTokens};

/// What a lexeme is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexemeKind {
    /// Produced by the external scanner.
    External(TokenKind),
    /// Lexed by the host: a word or a single character.
    Text,
}

/// One element of the driver's output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub span: Span,
}

impl From<Token> for Lexeme {
    fn from(token: Token) -> Self {
        Self {
            kind: LexemeKind::External(token.kind),
            span: token.span,
        }
    }
}

/// Saved position and scanner state after an external token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// Byte offset just past the token.
    pub offset: u32,
    /// Serialized scanner state at `offset`.
    pub state: Vec<u8>,
}

/// Drives the external scanner over a whole source text.
#[derive(Debug)]
pub struct Tokenizer {
    buf: SourceBuffer,
    scanner: Scanner,
    valid: ValidTokens,
    pos: u32,
    errors: Vec<ScanError>,
    checkpoints: Vec<Checkpoint>,
    done: bool,
}

impl Tokenizer {
    /// Tokenize `source` from the start, every token kind valid.
    pub fn new(source: &str, config: ScannerConfig) -> Self {
        Self {
            buf: SourceBuffer::new(source),
            scanner: Scanner::new(config),
            valid: ValidTokens::all(),
            pos: 0,
            errors: Vec::new(),
            checkpoints: Vec::new(),
            done: false,
        }
    }

    /// Restart at a checkpoint taken over the same source prefix.
    pub fn resume(
        source: &str,
        config: ScannerConfig,
        checkpoint: &Checkpoint,
    ) -> Result<Self, StateError> {
        let buf = SourceBuffer::new(source);
        let pos = checkpoint.offset.min(buf.len());
        Ok(Self {
            buf,
            scanner: Scanner::with_state(config, &checkpoint.state)?,
            valid: ValidTokens::all(),
            pos,
            errors: Vec::new(),
            checkpoints: Vec::new(),
            done: false,
        })
    }

    /// Restrict the token kinds offered to the scanner.
    #[must_use]
    pub fn with_valid(mut self, valid: ValidTokens) -> Self {
        self.valid = valid;
        self
    }

    /// Errors reported so far, in source order.
    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    /// Checkpoints saved so far, in source order.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Source text covered by `span`.
    pub fn text(&self, span: Span) -> &str {
        self.buf.cursor().slice(span.start, span.end)
    }

    /// Produce the next lexeme, or `None` at end of input.
    pub fn next_lexeme(&mut self) -> Option<Lexeme> {
        if self.done {
            return None;
        }
        let mut cursor = self.buf.cursor_at(self.pos);

        if let Some(token) = self.scanner.scan(&mut cursor, self.valid) {
            self.pos = cursor.pos();
            if let Some(kind) = token.error {
                self.errors.push(ScanError::new(token.span, kind));
            }
            self.save_checkpoint();
            return Some(token.into());
        }

        skip_extras(&mut cursor);
        if cursor.is_eof() {
            self.pos = cursor.pos();
            self.done = true;
            return None;
        }

        let brackets = &self.scanner.state().brackets;
        if let Some(Err(mismatch)) = lookahead::closing_bracket(&cursor, brackets) {
            self.errors.push(ScanError::new(
                Span::new(cursor.pos(), cursor.pos() + 1),
                mismatch.into(),
            ));
        }

        let start = cursor.pos();
        if is_ident_continue(cursor.current()) {
            cursor.eat_while(is_ident_continue);
        } else {
            cursor.advance_char();
        }
        self.pos = cursor.pos();
        Some(Lexeme {
            kind: LexemeKind::Text,
            span: Span::new(start, self.pos),
        })
    }

    fn save_checkpoint(&mut self) {
        match self.scanner.serialize() {
            Ok(state) => {
                trace!(offset = self.pos, len = state.len(), "checkpoint");
                self.checkpoints.push(Checkpoint {
                    offset: self.pos,
                    state,
                });
            }
            Err(err) => debug!(offset = self.pos, %err, "scanner state not saved"),
        }
    }
}

impl Iterator for Tokenizer {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        self.next_lexeme()
    }
}

/// Skip what a grammar treats as extras between its own tokens: all
/// whitespace, line breaks, Unicode space separators and explicit line
/// continuations.
fn skip_extras(cursor: &mut Cursor<'_>) {
    loop {
        match cursor.current() {
            b' ' | b'\t' | b'\x0C' | b'\n' | b'\r' => cursor.advance(),
            b'\\' if matches!(cursor.peek(), b'\n' | b'\r') => {
                cursor.advance();
                cursor.eat_line_break();
            }
            0x80..=0xFF => {
                let len = space_separator_len(cursor.bytes(cursor.pos(), cursor.pos() + 4));
                if len == 0 {
                    return;
                }
                cursor.advance_n(u32::try_from(len).unwrap_or(1));
            }
            _ => return,
        }
    }
}

/// Result of [`tokenize`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub lexemes: Vec<Lexeme>,
    pub errors: Vec<ScanError>,
}

/// Convenience function: tokenize a source string with the default
/// configuration and collect every lexeme and error.
pub fn tokenize(source: &str) -> Tokenized {
    tokenize_with(source, ScannerConfig::default())
}

/// [`tokenize`] with an explicit configuration.
pub fn tokenize_with(source: &str, config: ScannerConfig) -> Tokenized {
    let mut tokenizer = Tokenizer::new(source, config);
    let lexemes: Vec<Lexeme> = tokenizer.by_ref().collect();
    Tokenized {
        lexemes,
        errors: tokenizer.errors,
    }
}
