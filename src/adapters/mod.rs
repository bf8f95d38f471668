//! Infrastructure adapters for external systems.

pub mod in_memory;
pub mod plugins;

pub use in_memory::InMemoryTracker;
pub use plugins::github_issues::GitHubClient;
