//! Shared helpers for integration tests: the test process is its own
//! scan target, with slots carved out of a fresh VirtualAlloc region.

// Each integration test crate compiles this module and uses a subset.
#![allow(dead_code)]

use memwarden::{Address, ProcessHandle};
use std::ptr;
use winapi::ctypes::c_void;
use winapi::um::memoryapi::{VirtualAlloc, VirtualFree, VirtualProtect};
use winapi::um::winnt::{MEM_COMMIT, MEM_RELEASE, MEM_RESERVE, PAGE_READONLY, PAGE_READWRITE};

/// A read-write allocation released on drop
pub struct RwAlloc {
    base: *mut c_void,
    size: usize,
}

impl RwAlloc {
    pub fn new(size: usize) -> Self {
        let base = unsafe {
            VirtualAlloc(
                ptr::null_mut(),
                size,
                MEM_COMMIT | MEM_RESERVE,
                PAGE_READWRITE,
            )
        };
        assert!(!base.is_null(), "VirtualAlloc failed");
        RwAlloc { base, size }
    }

    pub fn addr(&self, offset: usize) -> Address {
        assert!(offset < self.size);
        Address::new(self.base as usize + offset)
    }

    /// Downgrades the whole allocation to read-only
    pub fn protect_readonly(&self) {
        let mut old = 0;
        let ok = unsafe { VirtualProtect(self.base, self.size, PAGE_READONLY, &mut old) };
        assert_ne!(ok, 0, "VirtualProtect failed");
    }
}

impl Drop for RwAlloc {
    fn drop(&mut self) {
        unsafe {
            VirtualFree(self.base, 0, MEM_RELEASE);
        }
    }
}

pub fn open_self() -> ProcessHandle {
    ProcessHandle::open(std::process::id()).expect("open self")
}

pub fn contains_address(addrs: &[Address], target: Address) -> bool {
    addrs.contains(&target)
}
