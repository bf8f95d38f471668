//! Synchronization driver.
//!
//! Runs one import: ensure the taxonomy, parse the document, resolve every
//! milestone, then create every issue in ascending ordinal order. Remote
//! failures never abort the run; they end up in the [`SyncSummary`].

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::models::{builtin_taxonomy, Issue, LabelSpec, SyncPhase, SyncSummary};
use crate::domain::ports::{IssueTracker, NewIssue, TrackerReply};
use crate::services::document_parser::DocumentParser;
use crate::services::remote_resolver::{RemoteStateResolver, ResolverCache};

/// Orchestrates one synchronization run against a tracker.
pub struct SyncDriver {
    tracker: Arc<dyn IssueTracker>,
    resolver: RemoteStateResolver,
    parser: DocumentParser,
    taxonomy: Vec<LabelSpec>,
    owner: String,
    repo: String,
    dry_run: bool,
}

impl SyncDriver {
    /// Creates a driver using the built-in label taxonomy.
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self {
            resolver: RemoteStateResolver::new(Arc::clone(&tracker)),
            tracker,
            parser: DocumentParser::new(),
            taxonomy: builtin_taxonomy(),
            owner: String::new(),
            repo: String::new(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_taxonomy(mut self, taxonomy: Vec<LabelSpec>) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    /// Repository identity recorded on the run span.
    #[must_use]
    pub fn with_target(mut self, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        self.owner = owner.into();
        self.repo = repo.into();
        self
    }

    /// Marks the run as dry-run in its summary and span.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs the full pipeline over `document` with a fresh resolver cache.
    pub async fn run(&self, document: &str) -> SyncSummary {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "sync",
            %run_id,
            owner = %self.owner,
            repo = %self.repo,
            dry_run = self.dry_run
        );
        self.run_inner(run_id, document).instrument(span).await
    }

    async fn run_inner(&self, run_id: Uuid, document: &str) -> SyncSummary {
        let mut summary = SyncSummary::new(run_id, self.dry_run);
        let mut cache = ResolverCache::new();

        info!(labels = self.taxonomy.len(), "ensuring label taxonomy");
        for label in &self.taxonomy {
            if self.resolver.ensure_label(&mut cache, label).await {
                summary.labels_ensured += 1;
            } else {
                summary.labels_failed += 1;
            }
        }
        summary.advance();

        let plan = self.parser.parse(document);
        info!(
            milestones = plan.milestones.len(),
            issues = plan.issues.len(),
            "document parsed"
        );
        summary.advance();

        for milestone in &plan.milestones {
            summary.milestones_processed += 1;
            if self.resolver.ensure_milestone(&mut cache, milestone).await.is_some() {
                summary.milestones_resolved += 1;
            }
        }
        summary.advance();

        for issue in &plan.issues {
            self.submit_issue(&cache, issue, &mut summary).await;
        }
        summary.advance();

        summary.advance();
        debug_assert_eq!(summary.phase, SyncPhase::Done);
        info!(
            milestones = summary.milestones_processed,
            created = summary.issues_created,
            failed = summary.issues_failed,
            "sync complete"
        );
        summary
    }

    async fn submit_issue(&self, cache: &ResolverCache, issue: &Issue, summary: &mut SyncSummary) {
        let milestone = cache.milestone(&issue.milestone);
        if milestone.is_none() {
            // TODO: raise to warn once typos in milestone titles should be surfaced
            debug!(
                issue = issue.number,
                milestone = %issue.milestone,
                "milestone unresolved, creating issue without it"
            );
        }

        let request = NewIssue {
            title: issue.title.clone(),
            body: issue.body.clone(),
            labels: issue.labels.clone(),
            milestone,
            assignees: issue.assignees.clone(),
        };

        match self.tracker.create_issue(&request).await {
            Ok(TrackerReply::Live(created)) => {
                info!(
                    issue = issue.number,
                    remote = created.number,
                    url = %created.html_url,
                    "created issue"
                );
                summary.issues_created += 1;
            }
            Ok(TrackerReply::DryRun) => summary.issues_created += 1,
            Err(e) => {
                warn!(issue = issue.number, title = %issue.title, error = %e, "failed to create issue");
                summary.record_issue_failure(issue.number, &issue.title, e.to_string());
            }
        }
    }
}

impl std::fmt::Debug for SyncDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncDriver")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("dry_run", &self.dry_run)
            .field("taxonomy", &self.taxonomy.len())
            .finish_non_exhaustive()
    }
}
