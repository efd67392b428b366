//! Process enumeration using the Windows ToolHelp32 API

use crate::core::types::{MemoryError, MemoryResult, ProcessInfo};
use crate::windows::utils::string_conv::wide_to_string;
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use winapi::um::winnt::HANDLE;

/// Iterator over a process snapshot
pub struct ProcessEnumerator {
    snapshot: HANDLE,
    first_called: bool,
}

impl ProcessEnumerator {
    /// Take a snapshot of the running processes
    pub fn new() -> MemoryResult<Self> {
        unsafe {
            let snapshot = CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0);
            if snapshot.is_null() || snapshot == INVALID_HANDLE_VALUE {
                return Err(MemoryError::Os {
                    code: crate::windows::utils::last_error_code(),
                });
            }
            Ok(ProcessEnumerator {
                snapshot,
                first_called: false,
            })
        }
    }

    fn next_process(&mut self) -> Option<ProcessInfo> {
        unsafe {
            let mut entry: PROCESSENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

            let success = if !self.first_called {
                self.first_called = true;
                Process32FirstW(self.snapshot, &mut entry)
            } else {
                Process32NextW(self.snapshot, &mut entry)
            };

            if success == FALSE {
                return None;
            }

            Some(ProcessInfo::new(
                entry.th32ProcessID,
                entry.th32ParentProcessID,
                wide_to_string(&entry.szExeFile),
            ))
        }
    }
}

impl Drop for ProcessEnumerator {
    fn drop(&mut self) {
        if !self.snapshot.is_null() && self.snapshot != INVALID_HANDLE_VALUE {
            unsafe {
                let _ = CloseHandle(self.snapshot);
            }
        }
    }
}

impl Iterator for ProcessEnumerator {
    type Item = ProcessInfo;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_process()
    }
}

/// Enumerate all running processes in snapshot order
pub fn enumerate_processes() -> MemoryResult<Vec<ProcessInfo>> {
    let enumerator = ProcessEnumerator::new()?;
    Ok(enumerator.collect())
}

/// The operator-facing roster: all processes sorted ascending by
/// executable name, case-insensitive
pub fn roster() -> MemoryResult<Vec<ProcessInfo>> {
    let mut processes = enumerate_processes()?;
    processes.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(processes)
}
