//! The scan/refine/pin engine
//!
//! A `Session` owns everything the UI renders: the selected process, any
//! number of independent candidate sets, and the watch list. All mutation
//! happens on the caller's thread; the reconciler only computes one tick
//! at a time over `&mut Session`.

pub mod candidate;
pub mod reconciler;
pub mod watch;

pub use candidate::{CandidateRow, CandidateSet};
pub use reconciler::{run_tick, TickOutcome, TICK_INTERVAL};
pub use watch::{WatchList, WatchOutcome, WatchRow};

use crate::core::types::{parse_value, MemoryError, MemoryResult, SelectedProcess, TypeTag};
use crate::memory::ScanOptions;
use crate::process::ProcessHandle;

/// Engine state for one operator session
pub struct Session {
    selected: Option<SelectedProcess>,
    sets: Vec<CandidateSet>,
    watch: WatchList,
    options: ScanOptions,
}

impl Session {
    /// Creates a session with `set_count` empty candidate sets
    pub fn new(set_count: usize) -> Self {
        Session::with_options(set_count, ScanOptions::default())
    }

    /// Creates a session with explicit scan options (chunk ceiling,
    /// result cap, epsilons)
    pub fn with_options(set_count: usize, options: ScanOptions) -> Self {
        Session {
            selected: None,
            sets: (0..set_count).map(|_| CandidateSet::new()).collect(),
            watch: WatchList::new(),
            options,
        }
    }

    /// Selects the scan target. PID 0 clears the selection.
    pub fn select_process(&mut self, pid: u32, name: impl Into<String>) {
        if pid == 0 {
            self.selected = None;
        } else {
            self.selected = Some(SelectedProcess::new(pid, name));
        }
    }

    /// Drops the current selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&SelectedProcess> {
        self.selected.as_ref()
    }

    /// Appends another candidate set; returns its id
    pub fn add_set(&mut self) -> usize {
        self.sets.push(CandidateSet::new());
        self.sets.len() - 1
    }

    pub fn sets(&self) -> &[CandidateSet] {
        &self.sets
    }

    pub(crate) fn sets_mut(&mut self) -> &mut [CandidateSet] {
        &mut self.sets
    }

    pub fn set(&self, id: usize) -> &CandidateSet {
        &self.sets[self.clamp_set(id)]
    }

    pub fn watch_list(&self) -> &WatchList {
        &self.watch
    }

    pub fn watch_list_mut(&mut self) -> &mut WatchList {
        &mut self.watch
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    // An out-of-range id falls back to the first set, mirroring how the
    // UI clamps its active-panel index.
    fn clamp_set(&self, id: usize) -> usize {
        if id < self.sets.len() {
            id
        } else {
            0
        }
    }

    /// Opens a scoped handle to the selected process
    pub fn open_selected(&self) -> MemoryResult<ProcessHandle> {
        let selected = self.selected.as_ref().ok_or(MemoryError::NoProcessSelected)?;
        ProcessHandle::open(selected.pid)
    }

    /// Parses `text` under `tag` and runs a fresh scan in set `id`.
    /// Returns the hit count. The handle lives only for this call.
    pub fn scan_set(&mut self, id: usize, tag: TypeTag, text: &str) -> MemoryResult<usize> {
        let target = parse_value(tag, text)?;
        let mut handle = self.open_selected()?;
        let id = self.clamp_set(id);
        let result = self.sets[id].scan(&handle, tag, target, &self.options);
        handle.close();
        result
    }

    /// Parses `text` under `tag` and refines set `id` in place.
    /// Returns the survivor count.
    pub fn refine_set(&mut self, id: usize, tag: TypeTag, text: &str) -> MemoryResult<usize> {
        let target = parse_value(tag, text)?;
        let mut handle = self.open_selected()?;
        let id = self.clamp_set(id);
        let result = self.sets[id].refine(&handle, tag, target, &self.options);
        handle.close();
        result
    }

    /// Copies a row out of a candidate set into the watch list
    pub fn watch_from_set(&mut self, set_id: usize, row_index: usize) -> Option<WatchOutcome> {
        let set_id = self.clamp_set(set_id);
        let row = *self.sets[set_id].rows().get(row_index)?;
        Some(self.watch.watch(row))
    }

    /// One-shot write of a watch row's desired value through a handle
    /// scoped to this call
    pub fn write_watch(&mut self, index: usize) -> MemoryResult<()> {
        let mut handle = self.open_selected()?;
        let result = self.watch.write_desired(index, &handle);
        handle.close();
        result
    }
}
