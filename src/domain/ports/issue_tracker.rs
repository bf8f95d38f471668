//! Issue tracker port.
//!
//! The resolver and the driver talk to the remote tracker exclusively through
//! [`IssueTracker`]. Every method answers with a [`TrackerReply`]: either a
//! live remote answer or the synthetic answer produced in dry-run mode.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainResult;
use crate::domain::models::{LabelSpec, MilestoneNumber};

/// Answer of a tracker operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerReply<T> {
    /// The remote service answered.
    Live(T),
    /// Dry-run: the call was logged, not sent. It would have succeeded.
    DryRun,
}

impl<T> TrackerReply<T> {
    pub const fn is_dry_run(&self) -> bool {
        matches!(self, Self::DryRun)
    }

    /// Returns the live value, discarding the dry-run marker.
    pub fn live(self) -> Option<T> {
        match self {
            Self::Live(value) => Some(value),
            Self::DryRun => None,
        }
    }
}

/// A label as known by the remote tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLabel {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// A milestone as known by the remote tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMilestone {
    pub number: MilestoneNumber,
    pub title: String,
}

/// Milestone creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMilestone {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub due_on: Option<String>,
}

/// Issue creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub milestone: Option<MilestoneNumber>,
    pub assignees: Vec<String>,
}

/// An issue created by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Tracker-assigned number (unrelated to the document ordinal).
    pub number: u64,
    pub html_url: String,
}

/// Port for the remote issue tracker.
///
/// Implementations must not retry; a failed call is reported once and the
/// caller decides what it means for the run.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Looks up a label by exact name. `Live(None)` means the label does not exist.
    async fn get_label(&self, name: &str) -> DomainResult<TrackerReply<Option<RemoteLabel>>>;

    /// Creates a label.
    async fn create_label(&self, label: &LabelSpec) -> DomainResult<TrackerReply<RemoteLabel>>;

    /// Lists every milestone of the repository, in remote order.
    async fn list_milestones(&self) -> DomainResult<TrackerReply<Vec<RemoteMilestone>>>;

    /// Creates an open milestone.
    async fn create_milestone(
        &self,
        milestone: &NewMilestone,
    ) -> DomainResult<TrackerReply<RemoteMilestone>>;

    /// Creates an issue.
    async fn create_issue(&self, issue: &NewIssue) -> DomainResult<TrackerReply<CreatedIssue>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_reply_live() {
        let reply = TrackerReply::Live(3);
        assert!(!reply.is_dry_run());
        assert_eq!(reply.live(), Some(3));
    }

    #[test]
    fn test_tracker_reply_dry_run() {
        let reply: TrackerReply<u32> = TrackerReply::DryRun;
        assert!(reply.is_dry_run());
        assert_eq!(reply.live(), None);
    }
}
