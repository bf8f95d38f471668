//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interfaces that adapters implement:
//! - IssueTracker: remote label, milestone and issue operations
//! - RateLimitPolicy: pacing between remote calls

pub mod issue_tracker;
pub mod rate_limit;

pub use issue_tracker::{
    CreatedIssue, IssueTracker, NewIssue, NewMilestone, RemoteLabel, RemoteMilestone,
    TrackerReply,
};
pub use rate_limit::{FixedDelay, RateLimitPolicy};
