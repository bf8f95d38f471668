//! Domain models.

pub mod config;
pub mod label;
pub mod plan;
pub mod sync;

pub use config::{Config, HttpConfig, LoggingConfig, RateLimitConfig, RepositoryConfig};
pub use label::{builtin_taxonomy, builtin_taxonomy_by_category, LabelCategory, LabelSpec};
pub use plan::{
    quarter_due_date, truncate_description, Issue, IssueFields, Milestone, MilestoneNumber,
    ParsedPlan, Quarter, MILESTONE_DESCRIPTION_LIMIT,
};
pub use sync::{FailedIssue, SyncPhase, SyncSummary};
