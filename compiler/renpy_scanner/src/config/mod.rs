//! Scanner configuration.
//!
//! Configuration is fixed for the lifetime of a [`Scanner`](crate::Scanner)
//! and is not part of the serialized state: a state saved under one
//! configuration must be restored under the same one.

use renpy_lexer_core::DEFAULT_TAB_WIDTH;

use crate::bracket::BracketKind;

/// Default cap on the length of one string content chunk, in bytes.
pub const MAX_CHUNK_LEN: u32 = 4096;

/// Default cap on the serialized state size, in bytes.
///
/// Matches the serialization buffer a tree-sitter host hands to external
/// scanners.
pub const MAX_STATE_LEN: usize = 1024;

/// Configuration for the external scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Tab stop width for indentation columns. Defaults to 8.
    pub tab_width: u32,

    /// Bracket whose opener starts an interpolation inside a string.
    /// Defaults to `[`, Ren'Py's `[name]` substitution.
    pub interpolation: BracketKind,

    /// Longest string content chunk emitted by a single call.
    pub max_chunk_len: u32,

    /// Largest serialized state accepted or produced.
    pub max_state_len: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            interpolation: BracketKind::Square,
            max_chunk_len: MAX_CHUNK_LEN,
            max_state_len: MAX_STATE_LEN,
        }
    }
}

impl ScannerConfig {
    /// Create a config with the given tab width.
    pub fn with_tab_width(tab_width: u32) -> Self {
        Self {
            tab_width,
            ..Default::default()
        }
    }

    /// Create a config with the given interpolation bracket.
    pub fn with_interpolation(interpolation: BracketKind) -> Self {
        Self {
            interpolation,
            ..Default::default()
        }
    }

    /// Create a config with the given content chunk cap (at least 1).
    pub fn with_max_chunk_len(max_chunk_len: u32) -> Self {
        Self {
            max_chunk_len: max_chunk_len.max(1),
            ..Default::default()
        }
    }

    /// Byte that triggers an interpolation inside string content.
    #[inline]
    pub fn interpolation_trigger(&self) -> u8 {
        self.interpolation.opener()
    }
}
