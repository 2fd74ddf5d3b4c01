//! Persisted scanner state and its byte codec.
//!
//! The host stores the state after every external token and hands it back
//! before the next call, so a re-scan can start at any token boundary.
//!
//! # Format
//!
//! ```text
//! [version: u8] [bincode payload]
//! ```
//!
//! The payload is a [`SnapshotV1`] encoded with bincode's varint options,
//! trailing bytes rejected. An empty buffer is the initial state (the host
//! has nothing saved before the first call). Decoding validates every
//! structural invariant, so a corrupted buffer is an error rather than a
//! scanner that later misbehaves.

use bincode::Options;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bracket::{BracketKind, BracketStack};
use crate::indent::IndentStack;
use crate::string::{Delimiter, StringStack};

/// Current state format version.
pub const FORMAT_VERSION: u8 = 1;

const FLAG_AFTER_NEWLINE: u8 = 1 << 0;
const KNOWN_FLAGS: u8 = FLAG_AFTER_NEWLINE;

/// Errors from decoding (or encoding) a serialized state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("unsupported scanner state version {0}")]
    UnsupportedVersion(u8),

    #[error("malformed scanner state: {0}")]
    Malformed(#[from] bincode::Error),

    #[error("inconsistent scanner state: {0}")]
    Invariant(&'static str),

    #[error("scanner state is {len} bytes, limit is {limit}")]
    TooLarge { len: usize, limit: usize },
}

/// Everything the scanner carries between calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerState {
    pub indents: IndentStack,
    pub brackets: BracketStack,
    pub strings: StringStack,
    /// A logical newline was the last structural boundary and no content
    /// has been seen since. Set at start of input.
    pub after_newline: bool,
}

impl Default for ScannerState {
    fn default() -> Self {
        Self {
            indents: IndentStack::new(),
            brackets: BracketStack::new(),
            strings: StringStack::new(),
            after_newline: true,
        }
    }
}

/// Wire form of [`ScannerState`], version 1.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotV1 {
    flags: u8,
    /// Indent levels above the `0` sentinel.
    indents: Vec<u32>,
    brackets: Vec<BracketKind>,
    strings: Vec<Delimiter>,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new().reject_trailing_bytes()
}

impl ScannerState {
    /// Encode the state, failing if it exceeds `limit` bytes.
    pub fn encode(&self, limit: usize) -> Result<Vec<u8>, StateError> {
        let snapshot = SnapshotV1 {
            flags: if self.after_newline {
                FLAG_AFTER_NEWLINE
            } else {
                0
            },
            indents: self.indents.levels().to_vec(),
            brackets: self.brackets.as_slice().to_vec(),
            strings: self.strings.as_slice().to_vec(),
        };
        let payload = codec().serialize(&snapshot)?;
        let len = payload.len() + 1;
        if len > limit {
            return Err(StateError::TooLarge { len, limit });
        }
        let mut out = Vec::with_capacity(len);
        out.push(FORMAT_VERSION);
        out.extend_from_slice(&payload);
        Ok(out)
    }

    /// Decode and validate a state produced by [`ScannerState::encode`].
    ///
    /// An empty buffer yields the initial state.
    pub fn decode(bytes: &[u8], limit: usize) -> Result<Self, StateError> {
        let Some((&version, payload)) = bytes.split_first() else {
            return Ok(Self::default());
        };
        if bytes.len() > limit {
            return Err(StateError::TooLarge {
                len: bytes.len(),
                limit,
            });
        }
        if version != FORMAT_VERSION {
            return Err(StateError::UnsupportedVersion(version));
        }
        let snapshot: SnapshotV1 = codec()
            .with_limit(u64::try_from(limit).unwrap_or(u64::MAX))
            .deserialize(payload)?;
        Self::from_snapshot(snapshot)
    }

    fn from_snapshot(snapshot: SnapshotV1) -> Result<Self, StateError> {
        if snapshot.flags & !KNOWN_FLAGS != 0 {
            return Err(StateError::Invariant("unknown state flags"));
        }
        let indents = IndentStack::from_levels(&snapshot.indents).ok_or(StateError::Invariant(
            "indentation levels must be positive and strictly increasing",
        ))?;
        let brackets = BracketStack::from_kinds(&snapshot.brackets);
        validate_strings(&snapshot.strings, brackets.depth())?;

        Ok(Self {
            indents,
            brackets,
            strings: StringStack::from_delimiters(&snapshot.strings),
            after_newline: snapshot.flags & FLAG_AFTER_NEWLINE != 0,
        })
    }
}

/// Open strings must use a quote character, nest at strictly increasing
/// bracket depths (an inner string lives inside an interpolation of the
/// outer one), and never sit above the current bracket depth.
fn validate_strings(strings: &[Delimiter], bracket_depth: u32) -> Result<(), StateError> {
    let mut previous: Option<u32> = None;
    for delimiter in strings {
        if delimiter.quote != b'"' && delimiter.quote != b'\'' {
            return Err(StateError::Invariant("string delimiter is not a quote"));
        }
        if previous.is_some_and(|depth| delimiter.depth <= depth) {
            return Err(StateError::Invariant(
                "nested strings must open at increasing bracket depths",
            ));
        }
        if delimiter.depth > bracket_depth {
            return Err(StateError::Invariant(
                "string opened deeper than the current bracket depth",
            ));
        }
        previous = Some(delimiter.depth);
    }
    Ok(())
}
