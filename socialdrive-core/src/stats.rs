use crate::{Account, OperationRecord, WorkflowError};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkflowState {
    CreatingAccounts,
    Following,
    Posting,
    Messaging,
    Done,
    Aborted,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Accounts,
    Follows,
    Posts,
    RingMessages,
    DirectMessages,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Accounts => "accounts",
            Phase::Follows => "follows",
            Phase::Posts => "posts",
            Phase::RingMessages => "ring messages",
            Phase::DirectMessages => "direct messages",
        })
    }
}

/// Every operation attempted in one phase, in the order it was issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    pub records: Vec<OperationRecord>,
}

impl PhaseReport {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            records: vec![],
        }
    }

    pub fn push(&mut self, record: OperationRecord) {
        self.records.push(record);
    }

    pub fn attempted(&self) -> usize {
        self.records.len()
    }

    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: attempted={}, succeeded={}, failed={}",
            self.phase,
            self.attempted(),
            self.succeeded(),
            self.failed()
        )
    }
}

/// Result of a whole workflow run.
///
/// Phases that never ran (because the gate aborted the run) have empty reports.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub state: WorkflowState,
    pub accounts: Vec<Account>,
    pub creation: PhaseReport,
    pub following: PhaseReport,
    pub posting: PhaseReport,
    pub ring_messages: PhaseReport,
    pub direct_messages: PhaseReport,
    pub abort_reason: Option<WorkflowError>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::CreatingAccounts,
            accounts: vec![],
            creation: PhaseReport::new(Phase::Accounts),
            following: PhaseReport::new(Phase::Follows),
            posting: PhaseReport::new(Phase::Posts),
            ring_messages: PhaseReport::new(Phase::RingMessages),
            direct_messages: PhaseReport::new(Phase::DirectMessages),
            abort_reason: None,
        }
    }

    pub fn phases(&self) -> [&PhaseReport; 5] {
        [
            &self.creation,
            &self.following,
            &self.posting,
            &self.ring_messages,
            &self.direct_messages,
        ]
    }

    pub fn is_aborted(&self) -> bool {
        self.state == WorkflowState::Aborted
    }

    /// Calls issued after the account gate.
    pub fn downstream_calls(&self) -> usize {
        self.phases()[1..].iter().map(|p| p.attempted()).sum()
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
