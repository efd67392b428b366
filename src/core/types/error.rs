//! Error types for memwarden engine operations

use super::value::TypeTag;
use thiserror::Error;

/// Main error type for process-memory operations
#[derive(Error, Debug)]
pub enum MemoryError {
    /// Opening the target failed; covers access-denied, a dead PID, and
    /// any other OS-level open failure.
    #[error("process {pid} unavailable: {reason}")]
    ProcessUnavailable { pid: u32, reason: String },

    #[error("operation on a closed process handle")]
    InvalidHandle,

    #[error("short read: {got}")]
    ShortRead { got: usize },

    #[error("short write: {got}")]
    ShortWrite { got: usize },

    #[error("os error {code}")]
    Os { code: u32 },

    #[error("enter a value to search")]
    ParseEmpty,

    #[error("invalid {tag}: value out of range")]
    ParseOutOfRange { tag: TypeTag },

    #[error("invalid {tag}: enter a {tag} value (got {input:?})")]
    ParseSyntax { tag: TypeTag, input: String },

    #[error("refine requires the same type as the last scan ({active} set, {requested} requested)")]
    RefineTypeMismatch { active: TypeTag, requested: TypeTag },

    #[error("no previous results to refine")]
    RefineEmpty,

    #[error("no process selected")]
    NoProcessSelected,

    #[error("unsupported type: {0}")]
    UnsupportedType(String),
}

/// Result type alias for process-memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates a process-unavailable error with a human-readable reason
    pub fn process_unavailable(pid: u32, reason: impl Into<String>) -> Self {
        MemoryError::ProcessUnavailable {
            pid,
            reason: reason.into(),
        }
    }

    /// True for any of the value-parsing failures
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            MemoryError::ParseEmpty
                | MemoryError::ParseOutOfRange { .. }
                | MemoryError::ParseSyntax { .. }
        )
    }
}
