//! In-memory issue tracker for testing.
//!
//! Keeps labels, milestones and issues in process memory and behaves like a
//! real tracker across runs: whatever one run creates, the next run finds.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{LabelSpec, MilestoneNumber};
use crate::domain::ports::{
    CreatedIssue, IssueTracker, NewIssue, NewMilestone, RemoteLabel, RemoteMilestone,
    TrackerReply,
};

#[derive(Debug, Default)]
struct TrackerState {
    labels: Vec<RemoteLabel>,
    milestones: Vec<RemoteMilestone>,
    issues: Vec<NewIssue>,
    calls: usize,
    failing_labels: HashSet<String>,
    failing_issues: HashSet<String>,
    fail_milestone_creation: bool,
}

/// Process-local tracker.
///
/// Cloning shares the underlying state, so a test can hand one clone to the
/// driver and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTracker {
    state: Arc<RwLock<TrackerState>>,
    dry_run: bool,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker answering every call with [`TrackerReply::DryRun`].
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// Seeds an existing label.
    pub async fn seed_label(&self, name: &str) {
        self.state.write().await.labels.push(RemoteLabel {
            name: name.to_string(),
            color: "ededed".to_string(),
        });
    }

    /// Seeds an existing milestone, returning its number.
    pub async fn seed_milestone(&self, title: &str) -> MilestoneNumber {
        let mut state = self.state.write().await;
        let number = MilestoneNumber::new(state.milestones.len() as u64 + 1);
        state.milestones.push(RemoteMilestone {
            number,
            title: title.to_string(),
        });
        number
    }

    /// Makes creation of the named label fail with a 422.
    pub async fn fail_label(&self, name: &str) {
        self.state.write().await.failing_labels.insert(name.to_string());
    }

    /// Makes creation of issues with this title fail with a 422.
    pub async fn fail_issue(&self, title: &str) {
        self.state.write().await.failing_issues.insert(title.to_string());
    }

    /// Makes every milestone creation fail with a 422.
    pub async fn fail_milestones(&self) {
        self.state.write().await.fail_milestone_creation = true;
    }

    /// Number of port calls received, dry-run calls included.
    pub async fn call_count(&self) -> usize {
        self.state.read().await.calls
    }

    pub async fn label_names(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .labels
            .iter()
            .map(|l| l.name.clone())
            .collect()
    }

    pub async fn milestones(&self) -> Vec<RemoteMilestone> {
        self.state.read().await.milestones.clone()
    }

    pub async fn issues(&self) -> Vec<NewIssue> {
        self.state.read().await.issues.clone()
    }

    async fn record_call(&self) -> bool {
        self.state.write().await.calls += 1;
        self.dry_run
    }

    fn rejected(operation: &'static str, what: &str) -> DomainError {
        DomainError::RemoteStatus {
            operation,
            status: 422,
            body: format!("Validation Failed: {what}"),
        }
    }
}

#[async_trait]
impl IssueTracker for InMemoryTracker {
    async fn get_label(&self, name: &str) -> DomainResult<TrackerReply<Option<RemoteLabel>>> {
        if self.record_call().await {
            return Ok(TrackerReply::DryRun);
        }
        let state = self.state.read().await;
        Ok(TrackerReply::Live(
            state.labels.iter().find(|l| l.name == name).cloned(),
        ))
    }

    async fn create_label(&self, label: &LabelSpec) -> DomainResult<TrackerReply<RemoteLabel>> {
        if self.record_call().await {
            return Ok(TrackerReply::DryRun);
        }
        let mut state = self.state.write().await;
        if state.failing_labels.contains(&label.name)
            || state.labels.iter().any(|l| l.name == label.name)
        {
            return Err(Self::rejected("create_label", &label.name));
        }
        let created = RemoteLabel {
            name: label.name.clone(),
            color: label.color.clone(),
        };
        state.labels.push(created.clone());
        Ok(TrackerReply::Live(created))
    }

    async fn list_milestones(&self) -> DomainResult<TrackerReply<Vec<RemoteMilestone>>> {
        if self.record_call().await {
            return Ok(TrackerReply::DryRun);
        }
        Ok(TrackerReply::Live(self.state.read().await.milestones.clone()))
    }

    async fn create_milestone(
        &self,
        milestone: &NewMilestone,
    ) -> DomainResult<TrackerReply<RemoteMilestone>> {
        if self.record_call().await {
            return Ok(TrackerReply::DryRun);
        }
        let mut state = self.state.write().await;
        if state.fail_milestone_creation
            || state.milestones.iter().any(|m| m.title == milestone.title)
        {
            return Err(Self::rejected("create_milestone", &milestone.title));
        }
        let created = RemoteMilestone {
            number: MilestoneNumber::new(state.milestones.len() as u64 + 1),
            title: milestone.title.clone(),
        };
        state.milestones.push(created.clone());
        Ok(TrackerReply::Live(created))
    }

    async fn create_issue(&self, issue: &NewIssue) -> DomainResult<TrackerReply<CreatedIssue>> {
        if self.record_call().await {
            return Ok(TrackerReply::DryRun);
        }
        let mut state = self.state.write().await;
        if state.failing_issues.contains(&issue.title) {
            return Err(Self::rejected("create_issue", &issue.title));
        }
        state.issues.push(issue.clone());
        let number = state.issues.len() as u64;
        Ok(TrackerReply::Live(CreatedIssue {
            number,
            html_url: format!("memory://issues/{number}"),
        }))
    }
}
