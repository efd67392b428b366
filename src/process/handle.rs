//! Scoped process handle with RAII semantics
//!
//! A handle is opened with the combined query/read/write/operate rights
//! the engine needs and is released on drop; `close` may also be called
//! explicitly and is idempotent. Every operation on a closed handle fails
//! with `InvalidHandle`.

use crate::core::types::{MemoryError, MemoryResult};
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use std::fmt;
use winapi::um::winnt::{HANDLE, MEMORY_BASIC_INFORMATION};

/// Access rights for process handles
#[derive(Debug, Clone, Copy)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    /// Query information access
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    /// Read memory access
    pub const VM_READ: Self = Self { value: 0x0010 };
    /// Write memory access
    pub const VM_WRITE: Self = Self { value: 0x0020 };
    /// Required alongside VM_WRITE for WriteProcessMemory
    pub const VM_OPERATION: Self = Self { value: 0x0008 };

    /// Combine access rights
    pub fn combine(rights: &[Self]) -> Self {
        let mut value = 0;
        for right in rights {
            value |= right.value;
        }
        Self { value }
    }

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Owned handle to a foreign process
pub struct ProcessHandle {
    handle: Handle,
    pid: u32,
}

impl ProcessHandle {
    /// Open a process with the engine's full rights set:
    /// query + read + write + operate.
    pub fn open(pid: u32) -> MemoryResult<Self> {
        let access = ProcessAccess::combine(&[
            ProcessAccess::QUERY_INFORMATION,
            ProcessAccess::VM_READ,
            ProcessAccess::VM_WRITE,
            ProcessAccess::VM_OPERATION,
        ]);
        let raw_handle = kernel32::open_process(pid, access.value())?;
        Ok(ProcessHandle {
            handle: Handle::new(raw_handle),
            pid,
        })
    }

    /// Wrap a raw handle without opening anything
    ///
    /// # Safety
    /// Intended for tests; the handle must be valid or null.
    #[doc(hidden)]
    pub fn from_raw_handle(handle: HANDLE, pid: u32) -> Self {
        ProcessHandle {
            handle: Handle::new(handle),
            pid,
        }
    }

    /// Get the process ID
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// True until `close` (or drop) releases the OS handle
    pub fn is_open(&self) -> bool {
        !self.handle.is_null()
    }

    /// Release the OS handle. Idempotent; safe on a null handle.
    pub fn close(&mut self) {
        self.handle.close();
    }

    /// Get the raw handle
    ///
    /// # Safety
    /// The returned handle is only valid while this ProcessHandle is open
    pub unsafe fn raw(&self) -> HANDLE {
        self.handle.raw()
    }

    /// Read memory from the process, returning the byte count transferred
    pub fn read_memory(&self, address: usize, buffer: &mut [u8]) -> MemoryResult<usize> {
        if !self.is_open() {
            return Err(MemoryError::InvalidHandle);
        }
        unsafe { kernel32::read_process_memory(self.handle.raw(), address, buffer) }
    }

    /// Read memory tolerating partial transfer; returns the bytes that
    /// actually arrived (0 on failure or on a closed handle)
    pub fn read_memory_partial(&self, address: usize, buffer: &mut [u8]) -> usize {
        if !self.is_open() {
            return 0;
        }
        unsafe { kernel32::read_process_memory_partial(self.handle.raw(), address, buffer) }
    }

    /// Write memory to the process, returning the byte count transferred
    pub fn write_memory(&self, address: usize, data: &[u8]) -> MemoryResult<usize> {
        if !self.is_open() {
            return Err(MemoryError::InvalidHandle);
        }
        unsafe { kernel32::write_process_memory(self.handle.raw(), address, data) }
    }

    /// Query the memory region containing `address`
    pub fn query_region(&self, address: usize) -> MemoryResult<MEMORY_BASIC_INFORMATION> {
        if !self.is_open() {
            return Err(MemoryError::InvalidHandle);
        }
        unsafe { kernel32::virtual_query_ex(self.handle.raw(), address) }
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("open", &self.is_open())
            .finish()
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessHandle(pid={}, open={})", self.pid, self.is_open())
    }
}
