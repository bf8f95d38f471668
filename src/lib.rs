//! Plansync - markdown planning documents to GitHub issues
//!
//! Plansync reads a planning document declaring milestones and issues,
//! makes sure the label taxonomy and every milestone exist on the target
//! repository, and creates one issue per declared issue section.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Planning records, run summary, errors and port traits
//! - **Service Layer** (`services`): Document parser, remote state resolver, sync driver
//! - **Adapters** (`adapters`): GitHub REST client and an in-memory tracker
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use plansync::{InMemoryTracker, SyncDriver};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tracker = InMemoryTracker::new();
//!     let summary = SyncDriver::new(Arc::new(tracker)).run("### Milestone: v1.0-alpha (Q1 2026)").await;
//!     assert_eq!(summary.milestones_processed, 1);
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{GitHubClient, InMemoryTracker};
pub use domain::errors::{DomainError, DomainResult, SetupError};
pub use domain::models::{
    Config, Issue, LabelSpec, Milestone, MilestoneNumber, ParsedPlan, SyncPhase, SyncSummary,
};
pub use domain::ports::{FixedDelay, IssueTracker, RateLimitPolicy, TrackerReply};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{parse_document, DocumentParser, RemoteStateResolver, ResolverCache, SyncDriver};
