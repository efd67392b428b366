//! Windows API bindings
//!
//! Low-level FFI wrappers around the five OS primitives the engine needs:
//! open, close, region query, read, and write.

pub mod kernel32;

pub use kernel32::*;
