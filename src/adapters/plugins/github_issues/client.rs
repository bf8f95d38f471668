//! GitHub HTTP client.
//!
//! Wraps the GitHub REST API v3 for the operations the import needs and
//! implements the [`IssueTracker`] port on top of them. Every request goes
//! through [`GitHubClient::execute`], which is where dry-run short-circuits
//! and where the rate-limit pause is applied after each live call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult, SetupError};
use crate::domain::models::LabelSpec;
use crate::domain::ports::{
    CreatedIssue, IssueTracker, NewIssue, NewMilestone, RateLimitPolicy, RemoteLabel,
    RemoteMilestone, TrackerReply,
};

use super::models::{
    GitHubCreateIssueRequest, GitHubCreateIssueResponse, GitHubCreateLabelRequest,
    GitHubCreateMilestoneRequest, GitHubLabel, GitHubMilestone,
};

/// Base URL for the GitHub REST API v3.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Page size used when listing milestones. A shorter page is the last one.
const PAGE_SIZE: usize = 100;

const USER_AGENT: &str = concat!("plansync/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`GitHubClient`].
#[derive(Clone)]
pub struct GitHubClientConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub api_base: String,
    pub dry_run: bool,
    pub timeout: Duration,
}

impl GitHubClientConfig {
    pub fn new(token: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            api_base: GITHUB_API_BASE.to_string(),
            dry_run: false,
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for GitHubClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClientConfig")
            .field("token", &"[REDACTED]")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .field("dry_run", &self.dry_run)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Reads the API token from the named environment variable.
///
/// A missing or empty variable is a [`SetupError::MissingCredential`].
pub fn token_from_env(var: &str) -> Result<String, SetupError> {
    match std::env::var(var) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(SetupError::MissingCredential {
            var: var.to_string(),
        }),
    }
}

/// HTTP client for one GitHub repository.
///
/// All tracker methods return [`DomainResult`]; non-2xx answers map to
/// [`DomainError::RemoteStatus`], network errors to [`DomainError::Transport`].
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    token: String,
    owner: String,
    repo: String,
    api_base: Url,
    dry_run: bool,
    rate_limit: Arc<dyn RateLimitPolicy>,
}

impl GitHubClient {
    /// Builds a client from its settings and pause policy.
    pub fn new(
        config: GitHubClientConfig,
        rate_limit: Arc<dyn RateLimitPolicy>,
    ) -> Result<Self, SetupError> {
        let api_base = Url::parse(&config.api_base)
            .map_err(|e| SetupError::InvalidConfig(format!("api_base {}: {e}", config.api_base)))?;
        if api_base.cannot_be_a_base() {
            return Err(SetupError::InvalidConfig(format!(
                "api_base {} cannot carry a path",
                config.api_base
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SetupError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            token: config.token,
            owner: config.owner,
            repo: config.repo,
            api_base,
            dry_run: config.dry_run,
            rate_limit,
        })
    }

    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// `{api_base}/repos/{owner}/{repo}/{segments...}` with every segment
    /// percent-encoded.
    pub fn repo_url(&self, segments: &[&str]) -> DomainResult<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| DomainError::Validation(format!("{} cannot carry a path", self.api_base)))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str()])
            .extend(segments);
        Ok(url)
    }

    /// Sends one request, or logs it when in dry-run mode.
    ///
    /// The rate-limit pause follows every live call whether it succeeded or
    /// not. Dry-run calls neither touch the network nor pause.
    async fn execute<B: Serialize + Sync>(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        payload: Option<&B>,
    ) -> DomainResult<TrackerReply<Response>> {
        if self.dry_run {
            let body = payload
                .map(serde_json::to_string_pretty)
                .transpose()?
                .unwrap_or_default();
            tracing::info!(
                operation,
                method = %method,
                url = %url,
                payload = %body,
                "[dry run] request not sent"
            );
            return Ok(TrackerReply::DryRun);
        }

        tracing::debug!(operation, method = %method, url = %url, "GitHub request");

        let mut request = self
            .http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(body) = payload {
            request = request.json(body);
        }

        let result = request.send().await;
        self.rate_limit.after_call().await;

        let resp = result.map_err(|e| {
            tracing::warn!(operation, error = %e, "GitHub request failed");
            DomainError::Transport {
                operation,
                message: e.to_string(),
            }
        })?;
        Ok(TrackerReply::Live(resp))
    }

    /// Turns a non-2xx response into [`DomainError::RemoteStatus`].
    async fn check_status(operation: &'static str, resp: Response) -> DomainResult<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(operation, status = status.as_u16(), body = %body, "GitHub returned an error");
        Err(DomainError::RemoteStatus {
            operation,
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(operation: &'static str, resp: Response) -> DomainResult<T> {
        resp.json::<T>().await.map_err(|e| DomainError::Decode {
            operation,
            message: e.to_string(),
        })
    }

    /// Sends a request and decodes a 2xx body into `T`.
    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        payload: Option<&B>,
    ) -> DomainResult<TrackerReply<T>> {
        match self.execute(operation, method, url, payload).await? {
            TrackerReply::DryRun => Ok(TrackerReply::DryRun),
            TrackerReply::Live(resp) => {
                let resp = Self::check_status(operation, resp).await?;
                Ok(TrackerReply::Live(Self::decode(operation, resp).await?))
            }
        }
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base.as_str())
            .field("dry_run", &self.dry_run)
            .field("rate_limit", &self.rate_limit)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn get_label(&self, name: &str) -> DomainResult<TrackerReply<Option<RemoteLabel>>> {
        const OP: &str = "get_label";
        let url = self.repo_url(&["labels", name])?;

        let resp = match self.execute::<()>(OP, Method::GET, url, None).await? {
            TrackerReply::DryRun => return Ok(TrackerReply::DryRun),
            TrackerReply::Live(resp) => resp,
        };
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(TrackerReply::Live(None));
        }
        let resp = Self::check_status(OP, resp).await?;
        let label: GitHubLabel = Self::decode(OP, resp).await?;
        // the lookup ignores case; only an exact name counts as existing
        if label.name != name {
            tracing::debug!(wanted = name, found = %label.name, "label differs in case");
            return Ok(TrackerReply::Live(None));
        }
        Ok(TrackerReply::Live(Some(label.into())))
    }

    async fn create_label(&self, label: &LabelSpec) -> DomainResult<TrackerReply<RemoteLabel>> {
        let url = self.repo_url(&["labels"])?;
        let body = GitHubCreateLabelRequest::from(label);
        let reply: TrackerReply<GitHubLabel> = self
            .send_json("create_label", Method::POST, url, Some(&body))
            .await?;
        Ok(match reply {
            TrackerReply::Live(created) => TrackerReply::Live(created.into()),
            TrackerReply::DryRun => TrackerReply::DryRun,
        })
    }

    async fn list_milestones(&self) -> DomainResult<TrackerReply<Vec<RemoteMilestone>>> {
        let mut milestones = Vec::new();
        let mut page = 1_u32;

        loop {
            let mut url = self.repo_url(&["milestones"])?;
            url.query_pairs_mut()
                .append_pair("state", "all")
                .append_pair("per_page", &PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string());

            let reply: TrackerReply<Vec<GitHubMilestone>> = self
                .send_json::<(), _>("list_milestones", Method::GET, url, None)
                .await?;
            let batch = match reply {
                TrackerReply::DryRun => return Ok(TrackerReply::DryRun),
                TrackerReply::Live(batch) => batch,
            };

            let last = batch.len() < PAGE_SIZE;
            milestones.extend(batch.into_iter().map(RemoteMilestone::from));
            if last {
                break;
            }
            page += 1;
        }

        tracing::debug!(count = milestones.len(), "listed milestones");
        Ok(TrackerReply::Live(milestones))
    }

    async fn create_milestone(
        &self,
        milestone: &NewMilestone,
    ) -> DomainResult<TrackerReply<RemoteMilestone>> {
        let url = self.repo_url(&["milestones"])?;
        let body = GitHubCreateMilestoneRequest::from(milestone);
        let reply: TrackerReply<GitHubMilestone> = self
            .send_json("create_milestone", Method::POST, url, Some(&body))
            .await?;
        Ok(match reply {
            TrackerReply::Live(created) => TrackerReply::Live(created.into()),
            TrackerReply::DryRun => TrackerReply::DryRun,
        })
    }

    async fn create_issue(&self, issue: &NewIssue) -> DomainResult<TrackerReply<CreatedIssue>> {
        let url = self.repo_url(&["issues"])?;
        let body = GitHubCreateIssueRequest::from(issue);
        let reply: TrackerReply<GitHubCreateIssueResponse> = self
            .send_json("create_issue", Method::POST, url, Some(&body))
            .await?;
        Ok(match reply {
            TrackerReply::Live(created) => TrackerReply::Live(created.into()),
            TrackerReply::DryRun => TrackerReply::DryRun,
        })
    }
}
