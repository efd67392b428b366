//! Virtual memory region enumeration and protection classification

use crate::core::types::Address;
use crate::process::ProcessHandle;

/// Region state: committed pages
pub const MEM_COMMIT: u32 = 0x1000;

/// Page protection constants (low byte of the protection word)
pub const PAGE_NOACCESS: u32 = 0x01;
pub const PAGE_READONLY: u32 = 0x02;
pub const PAGE_READWRITE: u32 = 0x04;
pub const PAGE_WRITECOPY: u32 = 0x08;
pub const PAGE_EXECUTE: u32 = 0x10;
pub const PAGE_EXECUTE_READ: u32 = 0x20;
pub const PAGE_EXECUTE_READWRITE: u32 = 0x40;
pub const PAGE_EXECUTE_WRITECOPY: u32 = 0x80;
/// Guard flag; independent of the low protection byte
pub const PAGE_GUARD: u32 = 0x100;

/// Readable protections, judged on the low byte only (modifier flags such
/// as guard and no-cache are masked off first)
pub fn is_readable(protect: u32) -> bool {
    matches!(
        protect & 0xFF,
        PAGE_READONLY
            | PAGE_READWRITE
            | PAGE_WRITECOPY
            | PAGE_EXECUTE_READ
            | PAGE_EXECUTE_READWRITE
            | PAGE_EXECUTE_WRITECOPY
    )
}

/// Writable protections, judged on the low byte only
pub fn is_writable(protect: u32) -> bool {
    matches!(
        protect & 0xFF,
        PAGE_READWRITE | PAGE_WRITECOPY | PAGE_EXECUTE_READWRITE | PAGE_EXECUTE_WRITECOPY
    )
}

/// Whether the guard flag is set
pub fn is_guarded(protect: u32) -> bool {
    protect & PAGE_GUARD != 0
}

/// One contiguous range of the target's address space with uniform state
/// and protection
#[derive(Debug, Clone, Copy)]
pub struct RegionInfo {
    /// Base address of the region
    pub base: Address,
    /// Size of the region in bytes
    pub size: usize,
    /// Region state (MEM_COMMIT and friends)
    pub state: u32,
    /// Protection word
    pub protection: u32,
}

impl RegionInfo {
    pub fn is_committed(&self) -> bool {
        self.state == MEM_COMMIT
    }

    pub fn is_readable(&self) -> bool {
        is_readable(self.protection)
    }

    pub fn is_writable(&self) -> bool {
        is_writable(self.protection)
    }

    pub fn is_guarded(&self) -> bool {
        is_guarded(self.protection)
    }

    /// Committed, readable, non-guarded, and writable when the scan
    /// demands it
    pub fn is_scannable(&self, writable_only: bool) -> bool {
        self.is_committed()
            && self.is_readable()
            && !self.is_guarded()
            && (!writable_only || self.is_writable())
    }

    /// First address past the region
    pub fn end(&self) -> Address {
        self.base.add(self.size)
    }
}

/// Walks the target's regions from address 0 upward.
///
/// The walk ends when a query fails, a region reports zero size, or the
/// next base would fail to advance. No filtering happens here; the
/// scanner decides which regions to touch.
pub struct RegionWalker<'a> {
    handle: &'a ProcessHandle,
    next: usize,
    done: bool,
}

impl<'a> RegionWalker<'a> {
    pub fn new(handle: &'a ProcessHandle) -> Self {
        RegionWalker {
            handle,
            next: 0,
            done: false,
        }
    }
}

impl Iterator for RegionWalker<'_> {
    type Item = RegionInfo;

    fn next(&mut self) -> Option<RegionInfo> {
        if self.done {
            return None;
        }

        let mbi = match self.handle.query_region(self.next) {
            Ok(mbi) => mbi,
            Err(_) => {
                self.done = true;
                return None;
            }
        };

        let base = mbi.BaseAddress as usize;
        let size = mbi.RegionSize;
        if size == 0 {
            self.done = true;
            return None;
        }

        match base.checked_add(size) {
            Some(next) if next > self.next => self.next = next,
            _ => self.done = true,
        }

        Some(RegionInfo {
            base: Address::new(base),
            size,
            state: mbi.State,
            protection: mbi.Protect,
        })
    }
}
