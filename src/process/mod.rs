//! Process management: handles and enumeration

pub mod enumerator;
pub mod handle;

pub use enumerator::{enumerate_processes, roster, ProcessEnumerator};
pub use handle::{ProcessAccess, ProcessHandle};
