//! Process roster entries

use serde::{Deserialize, Serialize};

/// One entry from a process snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// Process ID
    pub pid: u32,
    /// Parent process ID
    pub parent_pid: u32,
    /// Executable name (no path)
    pub name: String,
}

impl ProcessInfo {
    /// Creates a new process entry
    pub fn new(pid: u32, parent_pid: u32, name: impl Into<String>) -> Self {
        ProcessInfo {
            pid,
            parent_pid,
            name: name.into(),
        }
    }

    /// Case-insensitive executable-name match
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// The process an operator has picked as the scan target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProcess {
    pub pid: u32,
    pub name: String,
}

impl SelectedProcess {
    pub fn new(pid: u32, name: impl Into<String>) -> Self {
        SelectedProcess {
            pid,
            name: name.into(),
        }
    }
}
