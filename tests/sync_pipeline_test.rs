//! End-to-end tests of the synchronization pipeline
//!
//! Covers the driver over the GitHub client (mock server) and over the
//! in-memory tracker, plus the setup checks performed before any remote call.

mod common;

use std::sync::Arc;

use common::{github_client, repo_path, small_taxonomy, temp_document, SAMPLE_DOCUMENT};
use mockito::{Matcher, Server};
use plansync::adapters::InMemoryTracker;
use plansync::cli::commands::sync;
use plansync::domain::errors::SetupError;
use plansync::domain::models::config::Config;
use plansync::domain::models::{builtin_taxonomy, SyncPhase};
use plansync::services::SyncDriver;
use serde_json::json;

#[tokio::test]
async fn test_sync_against_github_api() {
    let mut server = Server::new_async().await;

    let label_lookups = server
        .mock("GET", Matcher::Regex(format!("^{}/", repo_path("labels"))))
        .with_status(404)
        .expect(2)
        .create_async()
        .await;
    let label_creations = server
        .mock("POST", repo_path("labels").as_str())
        .with_status(201)
        .with_body(json!({ "name": "created", "color": "ededed" }).to_string())
        .expect(2)
        .create_async()
        .await;
    let milestone_list = server
        .mock("GET", Matcher::Regex(format!("^{}", repo_path("milestones"))))
        .match_query(Matcher::UrlEncoded("state".into(), "all".into()))
        .with_status(200)
        .with_body(json!([{ "number": 1, "title": "v0.9-preview" }]).to_string())
        .expect(1)
        .create_async()
        .await;
    let milestone_create = server
        .mock("POST", repo_path("milestones").as_str())
        .match_body(Matcher::PartialJson(json!({
            "title": "v1.0-alpha",
            "due_on": "2026-03-01T00:00:00Z"
        })))
        .with_status(201)
        .with_body(json!({ "number": 4, "title": "v1.0-alpha" }).to_string())
        .expect(1)
        .create_async()
        .await;
    let first_issue = server
        .mock("POST", repo_path("issues").as_str())
        .match_body(Matcher::PartialJson(json!({
            "title": "Bootloader",
            "milestone": 4,
            "labels": ["boot", "priority-critical"],
            "assignees": ["octocat"]
        })))
        .with_status(201)
        .with_body(json!({ "number": 10, "html_url": "https://github.com/octo/hello/issues/10" }).to_string())
        .expect(1)
        .create_async()
        .await;
    let second_issue = server
        .mock("POST", repo_path("issues").as_str())
        .match_body(Matcher::PartialJson(json!({
            "title": "Scheduler",
            "milestone": 4
        })))
        .with_status(201)
        .with_body(json!({ "number": 11, "html_url": "https://github.com/octo/hello/issues/11" }).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = github_client(&server.url(), false);
    let summary = SyncDriver::new(Arc::new(client))
        .with_taxonomy(small_taxonomy())
        .with_target("octo", "hello")
        .run(SAMPLE_DOCUMENT)
        .await;

    label_lookups.assert_async().await;
    label_creations.assert_async().await;
    milestone_list.assert_async().await;
    milestone_create.assert_async().await;
    first_issue.assert_async().await;
    second_issue.assert_async().await;

    assert_eq!(summary.phase, SyncPhase::Done);
    assert_eq!(summary.labels_ensured, 2);
    assert_eq!(summary.milestones_processed, 1);
    assert_eq!(summary.issues_created, 2);
    assert_eq!(summary.issues_failed, 0);
}

#[tokio::test]
async fn test_rejected_issue_does_not_stop_the_run() {
    let mut server = Server::new_async().await;

    let mut label_mocks = Vec::new();
    for label in small_taxonomy() {
        let mock = server
            .mock("GET", repo_path(&format!("labels/{}", label.name)).as_str())
            .with_status(200)
            .with_body(json!({ "name": label.name }).to_string())
            .create_async()
            .await;
        label_mocks.push(mock);
    }
    let _milestones = server
        .mock("GET", Matcher::Regex(format!("^{}", repo_path("milestones"))))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([{ "number": 2, "title": "v1.0-alpha" }]).to_string())
        .create_async()
        .await;
    let rejected = server
        .mock("POST", repo_path("issues").as_str())
        .match_body(Matcher::PartialJson(json!({ "title": "Bootloader" })))
        .with_status(422)
        .with_body(json!({ "message": "Validation Failed" }).to_string())
        .create_async()
        .await;
    let accepted = server
        .mock("POST", repo_path("issues").as_str())
        .match_body(Matcher::PartialJson(json!({ "title": "Scheduler", "milestone": 2 })))
        .with_status(201)
        .with_body(json!({ "number": 5, "html_url": "https://github.com/octo/hello/issues/5" }).to_string())
        .create_async()
        .await;

    let client = github_client(&server.url(), false);
    let summary = SyncDriver::new(Arc::new(client))
        .with_taxonomy(small_taxonomy())
        .run(SAMPLE_DOCUMENT)
        .await;

    for mock in &label_mocks {
        mock.assert_async().await;
    }
    rejected.assert_async().await;
    accepted.assert_async().await;
    assert_eq!(summary.labels_ensured, 2);
    assert_eq!(summary.issues_created, 1);
    assert_eq!(summary.issues_failed, 1);
    assert_eq!(summary.failed_issues[0].number, 1);
    assert_eq!(summary.failed_issues[0].title, "Bootloader");
    assert!(summary.failed_issues[0].reason.contains("422"));
}

#[tokio::test]
async fn test_dry_run_sync_makes_no_requests() {
    let mut server = Server::new_async().await;
    let get_mock = server.mock("GET", Matcher::Any).expect(0).create_async().await;
    let post_mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    let client = github_client(&server.url(), true);
    let summary = SyncDriver::new(Arc::new(client))
        .with_dry_run(true)
        .run(SAMPLE_DOCUMENT)
        .await;

    get_mock.assert_async().await;
    post_mock.assert_async().await;
    assert!(summary.dry_run);
    assert_eq!(summary.labels_ensured, builtin_taxonomy().len());
    assert_eq!(summary.milestones_resolved, 0);
    assert_eq!(summary.issues_created, 2);
}

#[tokio::test]
async fn test_rerun_is_idempotent_for_labels_and_milestones() {
    let tracker = InMemoryTracker::new();
    let taxonomy = builtin_taxonomy();

    let first = SyncDriver::new(Arc::new(tracker.clone())).run(SAMPLE_DOCUMENT).await;
    let second = SyncDriver::new(Arc::new(tracker.clone())).run(SAMPLE_DOCUMENT).await;

    let labels = tracker.label_names().await;
    assert_eq!(labels.len(), taxonomy.len());
    assert_eq!(tracker.milestones().await.len(), 1);
    assert_eq!(tracker.issues().await.len(), 4);
    assert_eq!(first.issues_created, 2);
    assert_eq!(second.issues_created, 2);
    assert_eq!(second.labels_failed, 0);
}

#[tokio::test]
async fn test_existing_remote_state_is_reused() {
    let tracker = InMemoryTracker::new();
    for label in builtin_taxonomy() {
        tracker.seed_label(&label.name).await;
    }
    let number = tracker.seed_milestone("v1.0-alpha").await;

    SyncDriver::new(Arc::new(tracker.clone())).run(SAMPLE_DOCUMENT).await;

    assert_eq!(tracker.milestones().await.len(), 1);
    let issues = tracker.issues().await;
    assert!(issues.iter().all(|i| i.milestone == Some(number)));
    // one lookup per label, one milestone listing, one call per issue
    assert_eq!(tracker.call_count().await, builtin_taxonomy().len() + 1 + 2);
}

#[test]
fn test_missing_credential_stops_before_document() {
    temp_env::with_var_unset("PLANSYNC_PIPELINE_TOKEN", || {
        let config = Config {
            token_env: "PLANSYNC_PIPELINE_TOKEN".to_string(),
            document: "/definitely/not/here.md".to_string(),
            ..Config::default()
        };
        let err = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(sync::run(&config))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::MissingCredential { var }) if var == "PLANSYNC_PIPELINE_TOKEN"
        ));
    });
}

#[test]
fn test_missing_document_is_setup_error() {
    let dir = common::temp_dir();
    let missing = dir.path().join("issues.md");

    temp_env::with_var("PLANSYNC_PIPELINE_TOKEN_SET", Some("ghp_x"), || {
        let config = Config {
            token_env: "PLANSYNC_PIPELINE_TOKEN_SET".to_string(),
            document: missing.to_string_lossy().into_owned(),
            ..Config::default()
        };
        let err = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(sync::run(&config))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SetupError>(),
            Some(SetupError::DocumentNotFound { .. })
        ));
    });
}

#[test]
fn test_cli_run_in_dry_run_mode() {
    let (_dir, path) = temp_document(SAMPLE_DOCUMENT);

    temp_env::with_var("PLANSYNC_PIPELINE_TOKEN_DRY", Some("ghp_x"), || {
        let mut config = Config {
            token_env: "PLANSYNC_PIPELINE_TOKEN_DRY".to_string(),
            document: path.to_string_lossy().into_owned(),
            dry_run: true,
            ..Config::default()
        };
        // unroutable; dry-run must never connect
        config.repository.api_base = "http://127.0.0.1:9".to_string();

        let out = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(sync::run(&config))
            .unwrap();
        assert!(out.summary.dry_run);
        assert_eq!(out.summary.issues_created, 2);
        assert_eq!(out.summary.issues_failed, 0);
        assert_eq!(out.repository, "cartesian-school/guardbsd");
    });
}
