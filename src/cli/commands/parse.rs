//! Implementation of the `plansync parse` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{list_table, output, render_list, truncate, CommandOutput};
use crate::domain::models::{Issue, Milestone, ParsedPlan};
use crate::infrastructure::config::ConfigOverrides;
use crate::services::DocumentParser;

use super::{document_override, init_logging, load_config, read_document};

#[derive(Args, Debug, Default)]
pub struct ParseArgs {
    /// Planning document to parse (default: issues.md)
    #[arg(short, long, value_name = "PATH")]
    pub document: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ParseOutput {
    pub document: String,
    pub milestones: Vec<Milestone>,
    pub issues: Vec<Issue>,
}

impl ParseOutput {
    pub fn new(document: impl Into<String>, plan: ParsedPlan) -> Self {
        Self {
            document: document.into(),
            milestones: plan.milestones,
            issues: plan.issues,
        }
    }
}

impl CommandOutput for ParseOutput {
    fn to_human(&self) -> String {
        let mut milestones = list_table(&["title", "due", "description"]);
        for m in &self.milestones {
            milestones.add_row(vec![
                m.title.clone(),
                m.due_date.format("%Y-%m-%d").to_string(),
                truncate(&m.description.replace('\n', " "), 50),
            ]);
        }

        let mut issues = list_table(&["#", "title", "milestone", "labels"]);
        for i in &self.issues {
            issues.add_row(vec![
                i.number.to_string(),
                truncate(&i.title, 40),
                i.milestone.clone(),
                truncate(&i.labels.join(", "), 40),
            ]);
        }

        format!(
            "{}\n\n{}",
            render_list("milestone", &milestones, self.milestones.len()),
            render_list("issue", &issues, self.issues.len())
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: ParseArgs, json_mode: bool, config_path: Option<&Path>) -> Result<()> {
    let overrides = ConfigOverrides {
        document: document_override(args.document.as_ref()),
        ..Default::default()
    };
    let config = load_config(config_path, &overrides)?;
    let _logger = init_logging(&config)?;

    let text = read_document(&config.document).await?;
    let plan = DocumentParser::new().parse(&text);

    output(&ParseOutput::new(config.document, plan), json_mode);
    Ok(())
}
