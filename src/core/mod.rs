//! Core module containing the fundamental types of the engine
//!
//! Everything here is OS-independent: addresses, numeric values and their
//! codec, process roster entries, and the error taxonomy.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{Address, MemoryError, MemoryResult, NumericValue, ProcessInfo, TypeTag};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Platform verification at compile time
#[cfg(not(target_os = "windows"))]
compile_error!("memwarden only supports Windows (region and protection semantics are Windows-specific)");
