//! Remote state resolver.
//!
//! Ensures labels and milestones exist on the tracker while keeping the
//! number of remote calls to a minimum. Positive answers are cached for the
//! lifetime of one run; dry-run answers never are.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::models::{LabelSpec, Milestone, MilestoneNumber};
use crate::domain::ports::{IssueTracker, NewMilestone, TrackerReply};

/// Per-run cache of confirmed remote state.
#[derive(Debug, Clone, Default)]
pub struct ResolverCache {
    labels: HashSet<String>,
    milestones: HashMap<String, MilestoneNumber>,
}

impl ResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.contains(name)
    }

    pub fn mark_label(&mut self, name: &str) {
        self.labels.insert(name.to_string());
    }

    pub fn milestone(&self, title: &str) -> Option<MilestoneNumber> {
        self.milestones.get(title).copied()
    }

    pub fn insert_milestone(&mut self, title: &str, number: MilestoneNumber) {
        self.milestones.insert(title.to_string(), number);
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn milestone_count(&self) -> usize {
        self.milestones.len()
    }
}

/// Resolves labels and milestones against the tracker.
#[derive(Clone)]
pub struct RemoteStateResolver {
    tracker: Arc<dyn IssueTracker>,
}

impl RemoteStateResolver {
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// Makes sure a label exists.
    ///
    /// Returns `true` when the label is known to exist or a dry-run creation
    /// was logged. A failed lookup falls through to creation; a failed
    /// creation returns `false`.
    pub async fn ensure_label(&self, cache: &mut ResolverCache, label: &LabelSpec) -> bool {
        if cache.has_label(&label.name) {
            return true;
        }

        match self.tracker.get_label(&label.name).await {
            Ok(TrackerReply::Live(Some(_))) => {
                debug!(label = %label.name, "label already exists");
                cache.mark_label(&label.name);
                return true;
            }
            Ok(TrackerReply::Live(None) | TrackerReply::DryRun) => {}
            Err(e) => debug!(label = %label.name, error = %e, "label lookup failed"),
        }

        match self.tracker.create_label(label).await {
            Ok(TrackerReply::Live(_)) => {
                info!(label = %label.name, "created label");
                cache.mark_label(&label.name);
                true
            }
            Ok(TrackerReply::DryRun) => true,
            Err(e) => {
                warn!(label = %label.name, error = %e, "failed to create label");
                false
            }
        }
    }

    /// Resolves a milestone to its remote number, creating it if needed.
    ///
    /// The first remote milestone whose title matches exactly wins. Returns
    /// `None` on failure and in dry-run mode.
    pub async fn ensure_milestone(
        &self,
        cache: &mut ResolverCache,
        milestone: &Milestone,
    ) -> Option<MilestoneNumber> {
        if let Some(number) = cache.milestone(&milestone.title) {
            return Some(number);
        }

        match self.tracker.list_milestones().await {
            Ok(TrackerReply::Live(existing)) => {
                if let Some(found) = existing.iter().find(|m| m.title == milestone.title) {
                    debug!(milestone = %milestone.title, number = %found.number, "milestone already exists");
                    cache.insert_milestone(&milestone.title, found.number);
                    return Some(found.number);
                }
            }
            Ok(TrackerReply::DryRun) => {}
            Err(e) => debug!(milestone = %milestone.title, error = %e, "milestone listing failed"),
        }

        let request = NewMilestone {
            title: milestone.title.clone(),
            description: milestone.description.clone(),
            due_on: Some(milestone.due_on()),
        };

        match self.tracker.create_milestone(&request).await {
            Ok(TrackerReply::Live(created)) => {
                info!(milestone = %milestone.title, number = %created.number, "created milestone");
                cache.insert_milestone(&milestone.title, created.number);
                Some(created.number)
            }
            Ok(TrackerReply::DryRun) => None,
            Err(e) => {
                warn!(milestone = %milestone.title, error = %e, "failed to create milestone");
                None
            }
        }
    }
}

impl std::fmt::Debug for RemoteStateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStateResolver").finish_non_exhaustive()
    }
}
