//! Target-process address type
//!
//! Addresses name locations in a foreign process and are plain integers:
//! they are never turned into pointers in this process.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An address in the target process's virtual address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub usize);

impl Address {
    /// Creates a new address
    pub const fn new(value: usize) -> Self {
        Address(value)
    }

    /// The null address
    pub const fn null() -> Self {
        Address(0)
    }

    /// Checks for the null address
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns the raw integer value
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// Offsets the address forward, saturating at the top of the space
    pub const fn add(&self, offset: usize) -> Self {
        Address(self.0.saturating_add(offset))
    }

    /// Offsets the address forward, `None` on wraparound
    pub fn checked_add(&self, offset: usize) -> Option<Self> {
        self.0.checked_add(offset).map(Address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl From<usize> for Address {
    fn from(value: usize) -> Self {
        Address::new(value)
    }
}
