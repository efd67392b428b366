//! Periodic reconciliation of watch rows and candidate sets
//!
//! Each tick opens a fresh handle to the selected process, pushes pinned
//! rows' desired values into the target, refreshes every current, and
//! closes the handle. A tick never panics; failures abort the tick and
//! surface as the outcome. The caller's timer must not let ticks overlap
//! (the CLI drives this with an interval that skips missed ticks).

use crate::core::types::MemoryError;
use crate::engine::Session;
use crate::memory::{MemoryReader, MemoryWriter};
use crate::process::ProcessHandle;
use std::time::Duration;
use tracing::warn;

/// Nominal reconciliation cadence: 2 Hz
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// What one reconciler tick did
#[derive(Debug)]
pub enum TickOutcome {
    /// No process selected, or no rows anywhere to refresh
    Skipped,
    /// Every row was reconciled
    Completed,
    /// The per-tick open failed; the PID is unavailable right now
    OpenFailed(MemoryError),
    /// A read or write mid-tick failed; the rest of the tick was abandoned
    Aborted(MemoryError),
}

impl TickOutcome {
    /// Status-line text for the UI, if this outcome warrants one
    pub fn status_line(&self, pid: u32) -> Option<String> {
        match self {
            TickOutcome::Skipped | TickOutcome::Completed => None,
            TickOutcome::OpenFailed(_) => Some(format!("PID {pid} unavailable")),
            TickOutcome::Aborted(_) => Some(format!("PID {pid} error")),
        }
    }
}

/// Runs one reconciler tick over the session.
///
/// Ordering within the tick: watch rows in list order, then candidate
/// sets in registration order, then rows within a set in list order.
pub fn run_tick(session: &mut Session) -> TickOutcome {
    let Some(selected) = session.selected().cloned() else {
        return TickOutcome::Skipped;
    };

    let has_rows =
        !session.watch_list().is_empty() || session.sets().iter().any(|s| !s.is_empty());
    if !has_rows {
        return TickOutcome::Skipped;
    }

    let mut handle = match ProcessHandle::open(selected.pid) {
        Ok(handle) => handle,
        Err(err) => {
            warn!(pid = selected.pid, error = %err, "refresh open error");
            return TickOutcome::OpenFailed(err);
        }
    };

    let outcome = reconcile(&handle, session);
    handle.close();
    outcome
}

fn reconcile(handle: &ProcessHandle, session: &mut Session) -> TickOutcome {
    let reader = MemoryReader::new(handle);
    let writer = MemoryWriter::new(handle);

    for row in session.watch_list_mut().rows_mut() {
        if row.pinned {
            match writer.write_then_read(row.tag, row.address, row.desired) {
                Ok(echo) => row.current = echo,
                Err(err) => {
                    warn!(address = %row.address, error = %err, "pin write error");
                    return TickOutcome::Aborted(err);
                }
            }
        } else {
            match reader.read_value(row.tag, row.address) {
                Ok(current) => row.current = current,
                Err(err) => {
                    warn!(address = %row.address, error = %err, "refresh read error");
                    return TickOutcome::Aborted(err);
                }
            }
        }
    }

    for set in session.sets_mut() {
        if let Err(err) = set.refresh(handle) {
            warn!(error = %err, "refresh read error");
            return TickOutcome::Aborted(err);
        }
    }

    TickOutcome::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Address, NumericValue, TypeTag};
    use crate::engine::CandidateRow;

    #[test]
    fn test_tick_skipped_without_selection() {
        let mut session = Session::new(3);
        assert!(matches!(run_tick(&mut session), TickOutcome::Skipped));
    }

    #[test]
    fn test_tick_skipped_without_rows() {
        let mut session = Session::new(3);
        session.select_process(std::process::id(), "self");
        assert!(matches!(run_tick(&mut session), TickOutcome::Skipped));
    }

    #[test]
    fn test_tick_open_failed_for_dead_pid() {
        let mut session = Session::new(1);
        // no real process carries this PID
        session.select_process(u32::MAX, "ghost");
        session.watch_list_mut().watch(CandidateRow::new(
            Address::new(0x1000),
            TypeTag::I32,
            NumericValue::Int(0),
        ));

        let outcome = run_tick(&mut session);
        assert!(matches!(outcome, TickOutcome::OpenFailed(_)));
        assert_eq!(
            outcome.status_line(u32::MAX),
            Some(format!("PID {} unavailable", u32::MAX))
        );
    }

    #[test]
    fn test_tick_refreshes_watch_current() {
        let mut session = Session::new(1);
        session.select_process(std::process::id(), "self");

        let slot: i64 = 4200;
        session.watch_list_mut().watch(CandidateRow::new(
            Address::new(&slot as *const i64 as usize),
            TypeTag::I64,
            NumericValue::Int(0),
        ));

        assert!(matches!(run_tick(&mut session), TickOutcome::Completed));
        assert_eq!(
            session.watch_list().get(0).unwrap().current,
            NumericValue::Int(4200)
        );
    }

    #[test]
    fn test_tick_pins_desired_into_target() {
        let mut session = Session::new(1);
        session.select_process(std::process::id(), "self");

        let mut slot: u32 = 1;
        session.watch_list_mut().watch(CandidateRow::new(
            Address::new(&mut slot as *mut u32 as usize),
            TypeTag::U32,
            NumericValue::Uint(1),
        ));
        session
            .watch_list_mut()
            .edit_desired(0, "421337", true)
            .unwrap();

        assert!(matches!(run_tick(&mut session), TickOutcome::Completed));
        assert_eq!(slot, 421337);
        assert_eq!(
            session.watch_list().get(0).unwrap().current,
            NumericValue::Uint(421337)
        );
    }

    #[test]
    fn test_tick_refreshes_candidate_sets() {
        use crate::engine::CandidateSet;

        let mut session = Session::new(1);
        session.select_process(std::process::id(), "self");

        let slot: u32 = 7;
        session.sets_mut()[0] = CandidateSet::seed(
            TypeTag::U32,
            vec![CandidateRow::new(
                Address::new(&slot as *const u32 as usize),
                TypeTag::U32,
                NumericValue::Uint(0),
            )],
        );

        assert!(matches!(run_tick(&mut session), TickOutcome::Completed));
        assert_eq!(session.set(0).rows()[0].current, NumericValue::Uint(7));
    }

    #[test]
    fn test_tick_aborts_on_unreadable_watch_row() {
        let mut session = Session::new(1);
        session.select_process(std::process::id(), "self");
        session.watch_list_mut().watch(CandidateRow::new(
            Address::new(0x10),
            TypeTag::I32,
            NumericValue::Int(0),
        ));

        let outcome = run_tick(&mut session);
        assert!(matches!(outcome, TickOutcome::Aborted(_)));
        assert_eq!(
            outcome.status_line(std::process::id()),
            Some(format!("PID {} error", std::process::id()))
        );
    }

    #[test]
    fn test_completed_has_no_status_line() {
        assert_eq!(TickOutcome::Completed.status_line(1), None);
        assert_eq!(TickOutcome::Skipped.status_line(1), None);
    }
}
