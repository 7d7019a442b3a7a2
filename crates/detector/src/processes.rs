// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-process run/blocked/dead state and the cause text held while blocked.

/// A process's run state.
///
/// `Blocked` carries a count because collective and select operations can
/// install more than one outstanding dependency row at once; the process
/// only returns to `Run` once every one of them has been matched or
/// cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Run,
    Blocked(u32),
    Dead,
}

impl ProcessState {
    pub fn is_run(self) -> bool {
        matches!(self, Self::Run)
    }

    pub fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}

#[derive(Debug, Clone)]
struct ProcessRecord {
    state: ProcessState,
    /// Verbatim log text of the operation that caused the current block
    /// (distilled spec §3's "cause event"); `None` while `Run`.
    cause: Option<String>,
}

/// Per-process state table, indexed by rank over `0..worldsize`.
#[derive(Debug)]
pub struct ProcessTable {
    records: Vec<ProcessRecord>,
}

impl ProcessTable {
    pub fn new(worldsize: usize) -> Self {
        Self {
            records: vec![
                ProcessRecord {
                    state: ProcessState::Run,
                    cause: None
                };
                worldsize
            ],
        }
    }

    pub fn state(&self, p: usize) -> ProcessState {
        self.records[p].state
    }

    /// Number of ranks this table covers (`0..worldsize`).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn cause(&self, p: usize) -> Option<&str> {
        self.records[p].cause.as_deref()
    }

    /// Transition `p` into (or further into) `Blocked`. If `p` was `Run`,
    /// record `cause` as the block's cause-event text.
    pub fn block(&mut self, p: usize, cause_if_run: impl FnOnce() -> String) {
        let rec = &mut self.records[p];
        rec.state = match rec.state {
            ProcessState::Run => {
                rec.cause = Some(cause_if_run());
                ProcessState::Blocked(1)
            }
            ProcessState::Blocked(n) => ProcessState::Blocked(n + 1),
            ProcessState::Dead => unreachable!("blocking a dead process"),
        };
    }

    /// Decrement `p`'s block count by one. Returns `true` if `p` became
    /// `Run` as a result (in which case the cause text is discarded).
    pub fn unblock_one(&mut self, p: usize) -> bool {
        let rec = &mut self.records[p];
        match rec.state {
            ProcessState::Blocked(1) => {
                rec.state = ProcessState::Run;
                rec.cause = None;
                true
            }
            ProcessState::Blocked(n) => {
                rec.state = ProcessState::Blocked(n - 1);
                false
            }
            ProcessState::Run | ProcessState::Dead => false,
        }
    }

    /// Unconditionally clear every outstanding wait for `p` and return it
    /// to `Run` (used when a select is satisfied: its whole row clears at
    /// once, regardless of how many producers it was counting).
    pub fn force_run(&mut self, p: usize) {
        let rec = &mut self.records[p];
        rec.state = ProcessState::Run;
        rec.cause = None;
    }

    pub fn mark_dead(&mut self, p: usize) {
        let rec = &mut self.records[p];
        rec.state = ProcessState::Dead;
        rec.cause = None;
    }
}

#[cfg(test)]
#[path = "processes_tests.rs"]
mod tests;
