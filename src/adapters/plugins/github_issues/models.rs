//! GitHub REST API request and response models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads. They are used
//! internally by the GitHub client and are not part of the domain model.

use serde::{Deserialize, Serialize};

use crate::domain::models::{LabelSpec, MilestoneNumber};
use crate::domain::ports::{CreatedIssue, NewIssue, NewMilestone, RemoteLabel, RemoteMilestone};

/// A label returned by the GitHub API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubLabel {
    pub name: String,
    /// Hex colour without the leading `#`.
    #[serde(default)]
    pub color: String,
}

impl From<GitHubLabel> for RemoteLabel {
    fn from(label: GitHubLabel) -> Self {
        Self {
            name: label.name,
            color: label.color,
        }
    }
}

/// Request body for creating a label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCreateLabelRequest {
    pub name: String,
    pub color: String,
    pub description: String,
}

impl From<&LabelSpec> for GitHubCreateLabelRequest {
    fn from(label: &LabelSpec) -> Self {
        Self {
            name: label.name.clone(),
            color: label.color.clone(),
            description: label.description.clone(),
        }
    }
}

/// A milestone returned by the GitHub API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubMilestone {
    /// Repository-scoped number used to attach issues.
    pub number: u64,
    pub title: String,
    /// `"open"` or `"closed"`.
    #[serde(default)]
    pub state: Option<String>,
}

impl From<GitHubMilestone> for RemoteMilestone {
    fn from(milestone: GitHubMilestone) -> Self {
        Self {
            number: MilestoneNumber::new(milestone.number),
            title: milestone.title,
        }
    }
}

/// Request body for creating a milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCreateMilestoneRequest {
    pub title: String,
    pub description: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
}

impl From<&NewMilestone> for GitHubCreateMilestoneRequest {
    fn from(milestone: &NewMilestone) -> Self {
        Self {
            title: milestone.title.clone(),
            description: milestone.description.clone(),
            state: "open".to_string(),
            due_on: milestone.due_on.clone(),
        }
    }
}

/// Request body for creating a new GitHub issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCreateIssueRequest {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    /// Milestone number; omitted when the milestone did not resolve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub assignees: Vec<String>,
}

impl From<&NewIssue> for GitHubCreateIssueRequest {
    fn from(issue: &NewIssue) -> Self {
        Self {
            title: issue.title.clone(),
            body: issue.body.clone(),
            labels: issue.labels.clone(),
            milestone: issue.milestone.map(MilestoneNumber::as_u64),
            assignees: issue.assignees.clone(),
        }
    }
}

/// Response from the create-issue endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCreateIssueResponse {
    pub number: u64,
    pub html_url: String,
}

impl From<GitHubCreateIssueResponse> for CreatedIssue {
    fn from(resp: GitHubCreateIssueResponse) -> Self {
        Self {
            number: resp.number,
            html_url: resp.html_url,
        }
    }
}
