//! Implementation of the `plansync labels` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{list_table, output, render_list, CommandOutput};
use crate::domain::models::{builtin_taxonomy_by_category, LabelCategory, LabelSpec};

#[derive(Debug, Serialize)]
pub struct LabelEntry {
    pub category: LabelCategory,
    #[serde(flatten)]
    pub label: LabelSpec,
}

#[derive(Debug, Serialize)]
pub struct LabelsOutput {
    pub labels: Vec<LabelEntry>,
}

impl LabelsOutput {
    pub fn builtin() -> Self {
        Self {
            labels: builtin_taxonomy_by_category()
                .into_iter()
                .map(|(category, label)| LabelEntry { category, label })
                .collect(),
        }
    }
}

impl CommandOutput for LabelsOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["category", "name", "color", "description"]);
        for entry in &self.labels {
            table.add_row(vec![
                entry.category.to_string(),
                entry.label.name.clone(),
                format!("#{}", entry.label.color),
                entry.label.description.clone(),
            ]);
        }
        render_list("label", &table, self.labels.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(json_mode: bool) -> Result<()> {
    output(&LabelsOutput::builtin(), json_mode);
    Ok(())
}
