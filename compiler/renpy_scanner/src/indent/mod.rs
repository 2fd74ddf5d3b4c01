//! Indentation stack and block transitions.
//!
//! The stack holds the column of every open block, strictly increasing from
//! bottom to top, with a sentinel `0` that is never popped. Each significant
//! line start is compared against the top:
//!
//! | Column vs. top | Transition |
//! |---|---|
//! | equal | [`Transition::Same`]: statement continues at this level |
//! | greater | [`Transition::Indent`]: column pushed |
//! | less | [`Transition::Dedent`]: one level popped per call |
//!
//! Dedents are issued one at a time so the scanner can return one token per
//! call; the caller re-runs the transition for the same line until it stops
//! dedenting. A pop that lands below the line's column (the column sits
//! between two open levels) is reported as a mismatch on that dedent and the
//! column is not pushed.

use smallvec::SmallVec;

/// Outcome of comparing a line's column with the top of the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Same,
    Indent,
    Dedent {
        /// New top of the stack when it ended up below the line's column.
        mismatch: Option<u32>,
    },
}

/// Stack of open block columns with a `0` sentinel at the bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndentStack {
    columns: SmallVec<[u32; 16]>,
}

impl Default for IndentStack {
    fn default() -> Self {
        let mut columns = SmallVec::new();
        columns.push(0);
        Self { columns }
    }
}

impl IndentStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a stack from the levels above the sentinel.
    ///
    /// Returns `None` unless `levels` is strictly increasing and positive.
    pub fn from_levels(levels: &[u32]) -> Option<Self> {
        let mut stack = Self::new();
        for &column in levels {
            if column <= stack.top() {
                return None;
            }
            stack.columns.push(column);
        }
        Some(stack)
    }

    /// Column of the innermost open block (`0` at top level).
    #[inline]
    pub fn top(&self) -> u32 {
        self.columns.last().copied().unwrap_or(0)
    }

    /// Number of open blocks above the sentinel.
    #[inline]
    pub fn depth(&self) -> usize {
        self.columns.len() - 1
    }

    /// Block columns above the sentinel, outermost first.
    pub fn levels(&self) -> &[u32] {
        &self.columns[1..]
    }

    /// Pop the innermost block. The sentinel is never popped.
    pub fn pop(&mut self) -> Option<u32> {
        if self.columns.len() > 1 {
            self.columns.pop()
        } else {
            None
        }
    }

    /// Apply one step of the block transition for a line at `column`.
    pub fn transition(&mut self, column: u32) -> Transition {
        let top = self.top();
        if column == top {
            Transition::Same
        } else if column > top {
            self.columns.push(column);
            Transition::Indent
        } else {
            self.pop();
            let new_top = self.top();
            Transition::Dedent {
                mismatch: (new_top < column).then_some(new_top),
            }
        }
    }
}
