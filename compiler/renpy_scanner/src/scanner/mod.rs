//! External scanner dispatch.
//!
//! One call to [`Scanner::scan`] produces at most one token. The dispatch
//! order is fixed:
//!
//! 1. string content, when the innermost string is in content mode;
//! 2. whitespace, explicit line continuations, and line breaks (a line
//!    break at bracket depth 0 that ends a line with content is a
//!    `NEWLINE`; other line breaks are skipped);
//! 3. end of input: pending newline, then one `DEDENT` per open block;
//! 4. the indentation decision at the first significant character of a
//!    line (`INDENT`, `DEDENT`, or nothing);
//! 5. comments, string starts, brackets and the `except` keyword;
//! 6. otherwise no token, and the grammar lexes the input itself.
//!
//! Layout, bracket and comment handling do not consult the valid-token
//! set; only `except` does.

use renpy_lexer_core::{indent_column, space_separator_len, Cursor};
use tracing::{debug, trace};

use crate::bracket::BracketKind;
use crate::config::ScannerConfig;
use crate::error::ScanErrorKind;
use crate::indent::Transition;
use crate::lookahead::{self, EXCEPT_LEN};
use crate::state::{ScannerState, StateError};
use crate::string::{self, StringEvent};
use crate::token::{Span, Token, TokenKind, ValidTokens};

/// The external scanner: configuration plus the state carried between
/// calls.
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    config: ScannerConfig,
    state: ScannerState,
}

impl Scanner {
    /// Create a scanner in the initial state.
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            state: ScannerState::default(),
        }
    }

    /// Create a scanner from a state saved by [`Scanner::serialize`].
    pub fn with_state(config: ScannerConfig, bytes: &[u8]) -> Result<Self, StateError> {
        Ok(Self {
            config,
            state: ScannerState::decode(bytes, config.max_state_len)?,
        })
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    /// Encode the current state.
    pub fn serialize(&self) -> Result<Vec<u8>, StateError> {
        self.state.encode(self.config.max_state_len)
    }

    /// Replace the current state with a saved one.
    ///
    /// On error the current state is left untouched.
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<(), StateError> {
        self.state = ScannerState::decode(bytes, self.config.max_state_len)?;
        Ok(())
    }

    /// Scan one token at the cursor.
    ///
    /// Returns `None` when no external token applies; the cursor is then
    /// back at its entry position (state changes made while deciding, such
    /// as leaving the start-of-line state, are kept).
    pub fn scan(&mut self, cursor: &mut Cursor<'_>, valid: ValidTokens) -> Option<Token> {
        let entry = *cursor;
        let token = self.scan_token(cursor, valid);
        match token {
            Some(token) => trace!(
                kind = %token.kind,
                span_start = token.span.start,
                span_end = token.span.end,
                brackets = self.state.brackets.depth(),
                indents = self.state.indents.depth(),
                "external token"
            ),
            None => *cursor = entry,
        }
        token
    }

    fn scan_token(&mut self, cursor: &mut Cursor<'_>, valid: ValidTokens) -> Option<Token> {
        if self.state.strings.in_content(self.state.brackets.depth()) {
            return self.scan_string_content(cursor);
        }

        if let Some(token) = self.skip_trivia(cursor) {
            return Some(token);
        }

        if cursor.is_eof() {
            return self.scan_eof(cursor);
        }

        if self.state.after_newline && self.state.brackets.is_empty() {
            if cursor.current() == b'#' {
                return Some(scan_comment(cursor));
            }
            if let Some(token) = self.scan_line_start(cursor) {
                return Some(token);
            }
        }

        self.scan_significant(cursor, valid)
    }

    /// Skip horizontal whitespace, line continuations and cosmetic line
    /// breaks. Returns a token if a line break is structural.
    fn skip_trivia(&mut self, cursor: &mut Cursor<'_>) -> Option<Token> {
        loop {
            skip_horizontal_space(cursor);

            if cursor.current() == b'\\' && is_line_break(cursor.peek()) {
                cursor.advance();
                cursor.eat_line_break();
                continue;
            }

            if !cursor.at_line_break() {
                return None;
            }

            if let Some(token) = self.unterminated_interpolation(cursor, false) {
                return Some(token);
            }

            let start = cursor.pos();
            cursor.eat_line_break();
            if self.state.brackets.is_empty() && !self.state.after_newline {
                self.state.after_newline = true;
                return Some(Token::new(
                    TokenKind::Newline,
                    Span::new(start, cursor.pos()),
                ));
            }
        }
    }

    fn scan_eof(&mut self, cursor: &Cursor<'_>) -> Option<Token> {
        if let Some(token) = self.unterminated_interpolation(cursor, true) {
            return Some(token);
        }
        if !self.state.brackets.is_empty() {
            debug!(
                pos = cursor.pos(),
                depth = self.state.brackets.depth(),
                "brackets left open at end of input"
            );
            self.state.brackets.truncate(0);
        }
        let here = Span::empty_at(cursor.pos());
        if !self.state.after_newline {
            self.state.after_newline = true;
            return Some(Token::new(TokenKind::Newline, here));
        }
        self.state
            .indents
            .pop()
            .map(|_| Token::new(TokenKind::Dedent, here))
    }

    /// Force the end of a string whose interpolation was never closed.
    ///
    /// Applies to any open string at end of input, and to single-line
    /// strings at a line break. Brackets opened since the string started
    /// are discarded.
    fn unterminated_interpolation(&mut self, cursor: &Cursor<'_>, at_eof: bool) -> Option<Token> {
        let delimiter = *self.state.strings.top()?;
        if delimiter.triple && !at_eof {
            return None;
        }
        self.state.brackets.truncate(delimiter.depth);
        self.state.strings.pop();
        debug!(
            pos = cursor.pos(),
            quote = %delimiter.quote_char(),
            "unterminated string interpolation"
        );
        Some(Token::with_error(
            TokenKind::StringEnd,
            Span::empty_at(cursor.pos()),
            ScanErrorKind::UnterminatedInterpolation,
        ))
    }

    /// Compare the column of the line starting at the cursor with the open
    /// blocks. Emits at most one layout token; the caller continues with
    /// ordinary dispatch when none is due.
    fn scan_line_start(&mut self, cursor: &Cursor<'_>) -> Option<Token> {
        let line = cursor.bytes(cursor.line_start(), cursor.source_len());
        let column = indent_column(line, self.config.tab_width)
            .unwrap_or_else(|| self.state.indents.top());
        let here = Span::empty_at(cursor.pos());

        match self.state.indents.transition(column) {
            Transition::Same => {
                self.state.after_newline = false;
                None
            }
            Transition::Indent => {
                self.state.after_newline = false;
                Some(Token::new(TokenKind::Indent, here))
            }
            // Stay at line start so the next call pops again.
            Transition::Dedent { mismatch: None } => Some(Token::new(TokenKind::Dedent, here)),
            Transition::Dedent {
                mismatch: Some(nearest),
            } => {
                self.state.after_newline = false;
                debug!(pos = cursor.pos(), column, nearest, "indentation mismatch");
                Some(Token::with_error(
                    TokenKind::Dedent,
                    here,
                    ScanErrorKind::IndentationMismatch { column, nearest },
                ))
            }
        }
    }

    /// Tokens that may start anywhere on a line.
    fn scan_significant(&mut self, cursor: &mut Cursor<'_>, valid: ValidTokens) -> Option<Token> {
        let start = cursor.pos();
        let byte = cursor.current();

        if byte == b'#' {
            return Some(scan_comment(cursor));
        }

        if let Some(delimiter) = string::scan_string_start(cursor, self.state.brackets.depth()) {
            self.state.strings.push(delimiter);
            return Some(Token::new(
                TokenKind::StringStart,
                Span::new(start, cursor.pos()),
            ));
        }

        if let Some(kind) = BracketKind::from_opener(byte) {
            self.state.brackets.open(kind);
            cursor.advance();
            return Some(Token::new(kind.open_token(), Span::new(start, cursor.pos())));
        }

        match lookahead::closing_bracket(cursor, &self.state.brackets) {
            Some(Ok(kind)) => {
                if self.state.brackets.close(kind).is_ok() {
                    cursor.advance();
                    return Some(Token::new(kind.close_token(), Span::new(start, cursor.pos())));
                }
            }
            Some(Err(mismatch)) => {
                debug!(
                    pos = start,
                    found = %mismatch.found,
                    expected = ?mismatch.expected,
                    "closing bracket declined"
                );
                return None;
            }
            None => {}
        }

        if valid.accepts(TokenKind::Except) && lookahead::at_except(cursor) {
            cursor.advance_n(EXCEPT_LEN);
            return Some(Token::new(TokenKind::Except, Span::new(start, cursor.pos())));
        }

        None
    }

    fn scan_string_content(&mut self, cursor: &mut Cursor<'_>) -> Option<Token> {
        let trigger = self.config.interpolation_trigger();
        let max_chunk = self.config.max_chunk_len;
        let start = cursor.pos();
        let delimiter = self.state.strings.top_mut()?;
        let event = string::scan_content(cursor, delimiter, trigger, max_chunk);
        let span = Span::new(start, cursor.pos());

        match event {
            StringEvent::Content => Some(Token::new(TokenKind::StringContent, span)),
            StringEvent::Interpolation => {
                self.state.brackets.open(self.config.interpolation);
                Some(Token::new(TokenKind::InterpolationEscape, span))
            }
            StringEvent::End => {
                self.state.strings.pop();
                Some(Token::new(TokenKind::StringEnd, span))
            }
            StringEvent::Unterminated => {
                let delimiter = self.state.strings.pop()?;
                debug!(pos = start, quote = %delimiter.quote_char(), "unterminated string");
                Some(Token::with_error(
                    TokenKind::StringEnd,
                    span,
                    ScanErrorKind::UnterminatedString {
                        quote: delimiter.quote_char(),
                    },
                ))
            }
        }
    }
}

fn is_line_break(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}

/// Skip spaces, tabs, form feeds and Unicode space separators.
fn skip_horizontal_space(cursor: &mut Cursor<'_>) {
    loop {
        match cursor.current() {
            b' ' | b'\t' | b'\x0C' => cursor.advance(),
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

/// `#` up to, not including, the line break.
fn scan_comment(cursor: &mut Cursor<'_>) -> Token {
    let start = cursor.pos();
    cursor.eat_until_line_break_or_eof();
    Token::new(TokenKind::Comment, Span::new(start, cursor.pos()))
}
