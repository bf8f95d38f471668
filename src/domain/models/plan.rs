//! Planning records extracted from the input document.
//!
//! A [`ParsedPlan`] is produced once per run by the document parser and is
//! never mutated afterwards. Milestones keep document order; issues are
//! ordered by their declared ordinal.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Maximum milestone description length accepted by the remote tracker.
pub const MILESTONE_DESCRIPTION_LIMIT: usize = 200;

/// Remote-assigned milestone number.
///
/// Issues refer to milestones by this number on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneNumber(u64);

impl MilestoneNumber {
    /// Wraps a raw milestone number.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MilestoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fiscal quarter of a milestone declaration (`Q1`..`Q4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quarter(u8);

impl Quarter {
    /// Returns `None` unless `value` is between 1 and 4.
    pub fn new(value: u8) -> Option<Self> {
        (1..=4).contains(&value).then_some(Self(value))
    }

    /// Month in which the quarter's milestone falls due: `3 * Q`.
    pub const fn due_month(self) -> u32 {
        self.0 as u32 * 3
    }

    /// Returns the quarter number.
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

/// Computes the due instant for a quarter and year: the 1st of month `3 * Q`
/// at midnight UTC.
pub fn quarter_due_date(quarter: Quarter, year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, quarter.due_month(), 1, 0, 0, 0)
        .single()
}

/// Truncates `text` to at most [`MILESTONE_DESCRIPTION_LIMIT`] characters.
pub fn truncate_description(text: &str) -> String {
    text.chars().take(MILESTONE_DESCRIPTION_LIMIT).collect()
}

/// A milestone declared in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique key within a run, e.g. `v1.0-alpha`.
    pub title: String,
    /// Midnight UTC on the 1st of the quarter's last month.
    pub due_date: DateTime<Utc>,
    /// Section body, truncated to the remote limit.
    pub description: String,
}

impl Milestone {
    /// Builds a milestone, deriving the due date and truncating the description.
    ///
    /// Returns `None` when the year cannot be represented.
    pub fn from_declaration(
        title: impl Into<String>,
        quarter: Quarter,
        year: i32,
        description: &str,
    ) -> Option<Self> {
        Some(Self {
            title: title.into(),
            due_date: quarter_due_date(quarter, year)?,
            description: truncate_description(description),
        })
    }

    /// Due date in the `YYYY-MM-DDTHH:MM:SSZ` form the tracker expects.
    pub fn due_on(&self) -> String {
        self.due_date.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// An issue declared in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Ordinal declared by the document. Used for ordering only.
    pub number: u64,
    pub title: String,
    /// Composed markdown body (description, estimate, tasks, optional blocks).
    pub body: String,
    /// Label names in document order; duplicates are kept.
    pub labels: Vec<String>,
    /// Title of the milestone this issue belongs to.
    pub milestone: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
}

/// Fields of one issue section, before body composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFields {
    pub description: String,
    pub estimate: String,
    pub tasks: String,
    pub acceptance: Option<String>,
    pub dependencies: Option<String>,
}

impl IssueFields {
    /// Renders the issue body.
    ///
    /// Order is fixed: description, estimate, tasks, then acceptance
    /// criteria and dependencies when present. Absent blocks produce no
    /// heading.
    pub fn compose_body(&self) -> String {
        let mut body = format!(
            "{}\n\n**Estimate:** {}\n\n## Tasks\n{}\n\n",
            self.description, self.estimate, self.tasks
        );
        if let Some(acceptance) = self.acceptance.as_deref().filter(|s| !s.is_empty()) {
            body.push_str(&format!("## Acceptance Criteria\n{acceptance}\n\n"));
        }
        if let Some(dependencies) = self.dependencies.as_deref().filter(|s| !s.is_empty()) {
            body.push_str(&format!("## Dependencies\n{dependencies}\n\n"));
        }
        body
    }
}

/// Output of the document parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPlan {
    /// Milestones in first-seen document order. May contain duplicate titles.
    pub milestones: Vec<Milestone>,
    /// Issues in ascending declared ordinal.
    pub issues: Vec<Issue>,
}
