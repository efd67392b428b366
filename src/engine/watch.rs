//! Operator-curated watch list with pin flags

use crate::core::types::{parse_value, MemoryResult};
use crate::engine::candidate::CandidateRow;
use crate::memory::MemoryWriter;
use crate::process::ProcessHandle;

/// Watch rows share the candidate row shape
pub type WatchRow = CandidateRow;

/// Result of a watch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The row was appended at this index
    Added(usize),
    /// The (address, type) pair was already present; the existing row's
    /// index is returned so the UI can select it
    AlreadyWatching(usize),
}

impl WatchOutcome {
    /// Index of the watched row either way
    pub fn index(self) -> usize {
        match self {
            WatchOutcome::Added(i) | WatchOutcome::AlreadyWatching(i) => i,
        }
    }
}

/// The list of rows the operator is watching or pinning
#[derive(Debug, Default)]
pub struct WatchList {
    rows: Vec<WatchRow>,
}

impl WatchList {
    pub fn new() -> Self {
        WatchList::default()
    }

    pub fn rows(&self) -> &[WatchRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [WatchRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WatchRow> {
        self.rows.get(index)
    }

    /// Appends a row, deduplicated on (address, type). Watching an
    /// already-watched row is idempotent.
    pub fn watch(&mut self, row: WatchRow) -> WatchOutcome {
        if let Some(i) = self
            .rows
            .iter()
            .position(|w| w.address == row.address && w.tag == row.tag)
        {
            return WatchOutcome::AlreadyWatching(i);
        }

        self.rows.push(WatchRow {
            pinned: false,
            ..row
        });
        WatchOutcome::Added(self.rows.len() - 1)
    }

    /// Removes the row at `index`. Returns the index the selection should
    /// move to: the predecessor, or 0 while the list stays non-empty.
    pub fn unwatch(&mut self, index: usize) -> Option<usize> {
        if index >= self.rows.len() {
            return None;
        }
        self.rows.remove(index);
        if self.rows.is_empty() {
            None
        } else {
            Some(index.saturating_sub(1))
        }
    }

    /// Flips the pin flag; returns the new state
    pub fn toggle_pin(&mut self, index: usize) -> Option<bool> {
        let row = self.rows.get_mut(index)?;
        row.pinned = !row.pinned;
        Some(row.pinned)
    }

    /// Replaces desired (parsed under the row's type) and the pin flag.
    /// A parse failure surfaces and mutates nothing. An out-of-range
    /// index is ignored.
    pub fn edit_desired(&mut self, index: usize, text: &str, pinned: bool) -> MemoryResult<()> {
        let Some(row) = self.rows.get_mut(index) else {
            return Ok(());
        };
        let desired = parse_value(row.tag, text)?;
        row.desired = desired;
        row.pinned = pinned;
        Ok(())
    }

    /// One-shot write of the row's desired value, storing the echo as
    /// current. An out-of-range index is ignored.
    pub fn write_desired(&mut self, index: usize, handle: &ProcessHandle) -> MemoryResult<()> {
        let Some(row) = self.rows.get_mut(index) else {
            return Ok(());
        };
        let echo = MemoryWriter::new(handle).write_then_read(row.tag, row.address, row.desired)?;
        row.current = echo;
        Ok(())
    }
}
