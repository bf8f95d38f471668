//! GitHub Issues native adapter.
//!
//! Implements the issue tracker port against the GitHub REST API: label
//! lookup and creation, milestone listing and creation, issue creation.

pub mod client;
pub mod models;

pub use client::{token_from_env, GitHubClient, GitHubClientConfig, GITHUB_API_BASE};
