//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use plansync::adapters::plugins::github_issues::{GitHubClient, GitHubClientConfig};
use plansync::domain::models::LabelSpec;
use plansync::domain::ports::FixedDelay;
use tempfile::TempDir;

pub const OWNER: &str = "octo";
pub const REPO: &str = "hello";
pub const TOKEN: &str = "test-token";

/// A document with one milestone and two issues declared out of order.
pub const SAMPLE_DOCUMENT: &str = "\
# Roadmap

### Milestone: v1.0-alpha (Q1 2026)
First bootable image.

### Issue #2: Scheduler
**Labels:** `uk-time, priority-high`
**Milestone:** v1.0-alpha
**Estimate:** 5d
**Description:**
Round-robin scheduler.
**Tasks:**
- [ ] run queue
- [ ] timer tick
**Dependencies:**
Issue #1

### Issue #1: Bootloader
**Labels:** `boot, priority-critical`
**Milestone:** v1.0-alpha
**Estimate:** 3d
**Assignees:** @octocat
**Description:**
Load the kernel image.
**Tasks:**
- [ ] stage1
**Acceptance Criteria:**
- Boots in QEMU
";

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Writes `contents` as `issues.md` in a fresh temporary directory.
pub fn temp_document(contents: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("issues.md");
    std::fs::write(&path, contents).expect("Failed to write document");
    (dir, path)
}

/// Client against `api_base` with no pause between calls.
pub fn github_client(api_base: &str, dry_run: bool) -> GitHubClient {
    github_client_with_delay(api_base, dry_run, FixedDelay::none())
}

pub fn github_client_with_delay(api_base: &str, dry_run: bool, delay: FixedDelay) -> GitHubClient {
    let config = GitHubClientConfig::new(TOKEN, OWNER, REPO)
        .with_api_base(api_base)
        .with_dry_run(dry_run);
    GitHubClient::new(config, Arc::new(delay)).expect("Failed to build client")
}

/// Path of a repository endpoint on the mock server.
pub fn repo_path(rest: &str) -> String {
    format!("/repos/{OWNER}/{REPO}/{rest}")
}

/// Two-label taxonomy keeping mock setups short.
pub fn small_taxonomy() -> Vec<LabelSpec> {
    vec![
        LabelSpec::new("boot", "ff6f00", "Boot and initialization"),
        LabelSpec::new("priority-critical", "d73a4a", "Critical priority - must have"),
    ]
}

/// Setup test logging
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
