//! Run lifecycle and summary types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Phase of one synchronization run.
///
/// Runs move strictly forward:
/// `Idle → LabelsEnsured → Parsed → MilestonesResolved → IssuesSubmitted → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Idle,
    LabelsEnsured,
    Parsed,
    MilestonesResolved,
    IssuesSubmitted,
    Done,
}

impl SyncPhase {
    /// The phase that follows this one, or `None` once the run is done.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::LabelsEnsured),
            Self::LabelsEnsured => Some(Self::Parsed),
            Self::Parsed => Some(Self::MilestonesResolved),
            Self::MilestonesResolved => Some(Self::IssuesSubmitted),
            Self::IssuesSubmitted => Some(Self::Done),
            Self::Done => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::LabelsEnsured => "labels_ensured",
            Self::Parsed => "parsed",
            Self::MilestonesResolved => "milestones_resolved",
            Self::IssuesSubmitted => "issues_submitted",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue whose creation call failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedIssue {
    pub number: u64,
    pub title: String,
    pub reason: String,
}

/// Tally of one run. This is the only observable summary of a sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub run_id: Uuid,
    pub dry_run: bool,
    pub phase: SyncPhase,
    pub labels_ensured: usize,
    pub labels_failed: usize,
    pub milestones_processed: usize,
    /// Milestones that resolved to a remote number.
    pub milestones_resolved: usize,
    pub issues_created: usize,
    pub issues_failed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_issues: Vec<FailedIssue>,
}

impl SyncSummary {
    pub fn new(run_id: Uuid, dry_run: bool) -> Self {
        Self {
            run_id,
            dry_run,
            phase: SyncPhase::Idle,
            labels_ensured: 0,
            labels_failed: 0,
            milestones_processed: 0,
            milestones_resolved: 0,
            issues_created: 0,
            issues_failed: 0,
            failed_issues: Vec::new(),
        }
    }

    /// Moves to the next phase and returns it.
    pub fn advance(&mut self) -> SyncPhase {
        if let Some(next) = self.phase.next() {
            tracing::info!(from = %self.phase, to = %next, "sync phase transition");
            self.phase = next;
        }
        self.phase
    }

    pub fn record_issue_failure(&mut self, number: u64, title: &str, reason: impl Into<String>) {
        self.issues_failed += 1;
        self.failed_issues.push(FailedIssue {
            number,
            title: title.to_string(),
            reason: reason.into(),
        });
    }

    /// Issues attempted in this run.
    pub const fn issues_attempted(&self) -> usize {
        self.issues_created + self.issues_failed
    }
}
