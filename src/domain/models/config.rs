use serde::{Deserialize, Serialize};

/// Main configuration structure for plansync
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Target repository
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Path of the planning document to import
    #[serde(default = "default_document")]
    pub document: String,

    /// Log intended remote calls without performing them
    #[serde(default)]
    pub dry_run: bool,

    /// Environment variable holding the tracker credential
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Delay between remote calls
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_document() -> String {
    "issues.md".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: RepositoryConfig::default(),
            document: default_document(),
            dry_run: false,
            token_env: default_token_env(),
            rate_limit: RateLimitConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Repository identity and API location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RepositoryConfig {
    /// User or organisation owning the repository
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Repository name
    #[serde(default = "default_repo_name")]
    pub name: String,

    /// REST API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_owner() -> String {
    "cartesian-school".to_string()
}

fn default_repo_name() -> String {
    "guardbsd".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            name: default_repo_name(),
            api_base: default_api_base(),
        }
    }
}

impl RepositoryConfig {
    /// `owner/name` slug.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Parses an `owner/name` slug, returning `None` if either half is empty.
    pub fn parse_slug(slug: &str) -> Option<(String, String)> {
        let (owner, name) = slug.split_once('/')?;
        let (owner, name) = (owner.trim(), name.trim());
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some((owner.to_string(), name.to_string()))
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Constant pause after every remote call, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

const fn default_delay_ms() -> u64 {
    1_000
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Optional directory for a daily-rotated JSON log file
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
