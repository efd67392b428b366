//! Candidate sets: independent search workspaces
//!
//! A set remembers the type of its last successful scan and the ordered
//! hit rows. Refinement re-reads every row against the live target and
//! keeps only the rows that still match.

use crate::core::types::{Address, MemoryError, MemoryResult, NumericValue, TypeTag};
use crate::memory::{MemoryReader, ScanOptions, Scanner};
use crate::process::ProcessHandle;
use serde::{Deserialize, Serialize};

/// One hit row: where a value lives, what it holds, and what the
/// operator wants it to hold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateRow {
    pub address: Address,
    pub tag: TypeTag,
    pub current: NumericValue,
    pub desired: NumericValue,
    pub pinned: bool,
}

impl CandidateRow {
    /// A fresh row; desired starts equal to current and nothing is pinned
    pub fn new(address: Address, tag: TypeTag, current: NumericValue) -> Self {
        CandidateRow {
            address,
            tag,
            current,
            desired: current,
            pinned: false,
        }
    }
}

/// An independent search workspace
#[derive(Debug, Default)]
pub struct CandidateSet {
    tag: Option<TypeTag>,
    rows: Vec<CandidateRow>,
}

impl CandidateSet {
    pub fn new() -> Self {
        CandidateSet::default()
    }

    /// The type of the last successful scan, if any
    pub fn tag(&self) -> Option<TypeTag> {
        self.tag
    }

    pub fn rows(&self) -> &[CandidateRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [CandidateRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Runs a fresh scan and replaces the set's contents with the hits.
    /// A row whose read-back fails gets the tag's zero as its current.
    /// A failed scan leaves the previous contents intact.
    pub fn scan(
        &mut self,
        handle: &ProcessHandle,
        tag: TypeTag,
        target: NumericValue,
        options: &ScanOptions,
    ) -> MemoryResult<usize> {
        let addresses = Scanner::new(handle).scan(tag, target, options)?;

        let reader = MemoryReader::new(handle);
        let rows = addresses
            .into_iter()
            .map(|address| {
                let current = reader
                    .read_value(tag, address)
                    .unwrap_or_else(|_| NumericValue::zero(tag));
                CandidateRow::new(address, tag, current)
            })
            .collect();

        self.tag = Some(tag);
        self.rows = rows;
        Ok(self.rows.len())
    }

    /// Re-reads every row and keeps only those whose fresh value matches
    /// `target`. Rows whose read fails are dropped. Survivors get the
    /// fresh value as both current and desired, and the backing storage
    /// is compacted to the survivor count.
    pub fn refine(
        &mut self,
        handle: &ProcessHandle,
        tag: TypeTag,
        target: NumericValue,
        options: &ScanOptions,
    ) -> MemoryResult<usize> {
        match self.tag {
            None => return Err(MemoryError::RefineEmpty),
            Some(active) if active != tag => {
                return Err(MemoryError::RefineTypeMismatch {
                    active,
                    requested: tag,
                })
            }
            Some(_) => {}
        }
        if self.rows.is_empty() {
            return Err(MemoryError::RefineEmpty);
        }

        let eps = options.epsilon(tag);
        let reader = MemoryReader::new(handle);

        let mut survivors = Vec::new();
        for row in &self.rows {
            let current = match reader.read_value(tag, row.address) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if current.matches(tag, target, eps) {
                let mut kept = *row;
                kept.current = current;
                kept.desired = current;
                survivors.push(kept);
            }
        }

        survivors.shrink_to_fit();
        self.rows = survivors;
        Ok(self.rows.len())
    }

    /// Builds a pre-populated set for tests
    #[cfg(test)]
    pub(crate) fn seed(tag: TypeTag, rows: Vec<CandidateRow>) -> Self {
        CandidateSet {
            tag: Some(tag),
            rows,
        }
    }

    /// Re-reads current for every row. The first read error aborts and
    /// surfaces; the caller treats the process as momentarily gone.
    pub fn refresh(&mut self, handle: &ProcessHandle) -> MemoryResult<()> {
        let reader = MemoryReader::new(handle);
        for row in &mut self.rows {
            row.current = reader.read_value(row.tag, row.address)?;
        }
        Ok(())
    }
}
