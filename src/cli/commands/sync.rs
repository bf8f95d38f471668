//! Implementation of the `plansync sync` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;

use crate::adapters::plugins::github_issues::{token_from_env, GitHubClient, GitHubClientConfig};
use crate::cli::output::{detail_table, list_table, output, truncate, CommandOutput};
use crate::domain::models::config::Config;
use crate::domain::models::SyncSummary;
use crate::domain::ports::FixedDelay;
use crate::infrastructure::config::ConfigOverrides;
use crate::services::SyncDriver;

use super::{document_override, init_logging, load_config, read_document};

#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Planning document to import (default: issues.md)
    #[arg(short, long, value_name = "PATH")]
    pub document: Option<PathBuf>,

    /// Log the calls that would be made without sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Target repository as OWNER/NAME
    #[arg(short, long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Pause after every remote call, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

impl SyncArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            document: document_override(self.document.as_ref()),
            dry_run: self.dry_run,
            repo: self.repo.clone(),
            delay_ms: self.delay_ms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SyncOutput {
    pub repository: String,
    pub document: String,
    #[serde(flatten)]
    pub summary: SyncSummary,
}

impl CommandOutput for SyncOutput {
    fn to_human(&self) -> String {
        let s = &self.summary;
        let mut lines = Vec::new();
        if s.dry_run {
            lines.push(
                style("Dry run: no changes were made on the tracker")
                    .yellow()
                    .to_string(),
            );
        }
        lines.push(format!(
            "{} {} -> {}",
            style("Sync complete").green().bold(),
            self.document,
            self.repository
        ));

        let rows = [
            ("Labels ensured", s.labels_ensured.to_string()),
            ("Labels failed", s.labels_failed.to_string()),
            ("Milestones processed", s.milestones_processed.to_string()),
            ("Milestones resolved", s.milestones_resolved.to_string()),
            ("Issues created", s.issues_created.to_string()),
            ("Issues failed", s.issues_failed.to_string()),
        ];
        lines.push(detail_table(&rows).to_string());

        if !s.failed_issues.is_empty() {
            let mut table = list_table(&["#", "title", "reason"]);
            for failed in &s.failed_issues {
                table.add_row(vec![
                    failed.number.to_string(),
                    truncate(&failed.title, 40),
                    truncate(&failed.reason, 60),
                ]);
            }
            lines.push(format!("\n{}\n{table}", style("Failed issues:").red().bold()));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Builds the tracker client for `config`.
pub fn build_client(config: &Config, token: String) -> Result<GitHubClient> {
    let client_config = GitHubClientConfig::new(
        token,
        config.repository.owner.clone(),
        config.repository.name.clone(),
    )
    .with_api_base(config.repository.api_base.clone())
    .with_dry_run(config.dry_run)
    .with_timeout(Duration::from_secs(config.http.timeout_secs));

    let pause = Arc::new(FixedDelay::from_millis(config.rate_limit.delay_ms));
    Ok(GitHubClient::new(client_config, pause)?)
}

/// Runs a full sync for an already loaded configuration.
///
/// The credential is checked first, then the document; both before any
/// remote call.
pub async fn run(config: &Config) -> Result<SyncOutput> {
    let token = token_from_env(&config.token_env)?;
    let document = read_document(&config.document).await?;
    let client = build_client(config, token)?;

    let summary = SyncDriver::new(Arc::new(client))
        .with_target(&config.repository.owner, &config.repository.name)
        .with_dry_run(config.dry_run)
        .run(&document)
        .await;

    Ok(SyncOutput {
        repository: config.repository.slug(),
        document: config.document.clone(),
        summary,
    })
}

pub async fn execute(args: SyncArgs, json_mode: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, &args.overrides())?;
    let _logger = init_logging(&config)?;

    let result = run(&config).await?;
    output(&result, json_mode);
    Ok(())
}
