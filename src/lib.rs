//! memwarden: memory inspector/editor engine for live Windows processes
//!
//! The engine opens a handle to a target process, scans its committed
//! address space for typed numeric values, refines the candidates as the
//! target mutates, and watches or pins chosen addresses to
//! operator-supplied values.

pub mod config;
pub mod core;
pub mod engine;
pub mod memory;
pub mod process;
pub mod windows;

// Re-export the types the UI layer works with
pub use crate::core::types::{
    parse_value, Address, MemoryError, MemoryResult, NumericValue, ProcessInfo, SelectedProcess,
    TypeTag,
};
pub use crate::engine::{
    run_tick, CandidateRow, CandidateSet, Session, TickOutcome, WatchList, WatchOutcome,
};
pub use crate::memory::{MemoryReader, MemoryWriter, ScanOptions, Scanner};
pub use crate::process::{roster, ProcessHandle};
