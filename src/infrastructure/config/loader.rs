use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::{Config, RepositoryConfig};

/// Configuration error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Repository owner cannot be empty")]
    EmptyOwner,

    #[error("Repository name cannot be empty")]
    EmptyRepository,

    #[error("Invalid api_base: {0}. Must be an http(s) URL")]
    InvalidApiBase(String),

    #[error("Document path cannot be empty")]
    EmptyDocument,

    #[error("token_env cannot be empty")]
    EmptyTokenEnv,

    #[error("Invalid timeout_secs: 0. Must be at least 1")]
    ZeroTimeout,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid repository slug: {0}. Expected OWNER/NAME")]
    InvalidSlug(String),
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub document: Option<String>,
    pub dry_run: bool,
    /// `OWNER/NAME`
    pub repo: Option<String>,
    pub delay_ms: Option<u64>,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .plansync/config.yaml (project config)
    /// 3. .plansync/local.yaml (project local overrides, optional)
    /// 4. Environment variables (PLANSYNC_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Same as [`load`](Self::load) with project files resolved under `root`.
    pub fn load_from_dir(root: impl AsRef<Path>) -> Result<Config> {
        let dir = root.as_ref().join(".plansync");
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed("PLANSYNC_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("PLANSYNC_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Applies command-line overrides and validates the result again.
    pub fn apply_overrides(mut config: Config, overrides: &ConfigOverrides) -> Result<Config, ConfigError> {
        if let Some(document) = &overrides.document {
            config.document.clone_from(document);
        }
        if overrides.dry_run {
            config.dry_run = true;
        }
        if let Some(slug) = &overrides.repo {
            let (owner, name) = RepositoryConfig::parse_slug(slug)
                .ok_or_else(|| ConfigError::InvalidSlug(slug.clone()))?;
            config.repository.owner = owner;
            config.repository.name = name;
        }
        if let Some(delay_ms) = overrides.delay_ms {
            config.rate_limit.delay_ms = delay_ms;
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.repository.owner.trim().is_empty() {
            return Err(ConfigError::EmptyOwner);
        }
        if config.repository.name.trim().is_empty() {
            return Err(ConfigError::EmptyRepository);
        }

        let api_base = config.repository.api_base.as_str();
        let has_host = api_base
            .strip_prefix("https://")
            .or_else(|| api_base.strip_prefix("http://"))
            .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'));
        if !has_host {
            return Err(ConfigError::InvalidApiBase(api_base.to_string()));
        }

        if config.document.trim().is_empty() {
            return Err(ConfigError::EmptyDocument);
        }

        if config.token_env.trim().is_empty() {
            return Err(ConfigError::EmptyTokenEnv);
        }

        if config.http.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.repository.slug(), "cartesian-school/guardbsd");
        assert_eq!(config.token_env, "GITHUB_TOKEN");
        assert_eq!(config.http.timeout_secs, 30);
        assert!(!config.dry_run);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_validate_empty_owner() {
        let mut config = Config::default();
        config.repository.owner = "  ".to_string();
        assert_eq!(ConfigLoader::validate(&config), Err(ConfigError::EmptyOwner));
    }

    #[test]
    fn test_validate_empty_repository() {
        let mut config = Config::default();
        config.repository.name = String::new();
        assert_eq!(ConfigLoader::validate(&config), Err(ConfigError::EmptyRepository));
    }

    #[test]
    fn test_validate_api_base() {
        let mut config = Config::default();
        for bad in ["ftp://example.com", "api.github.com", "https://", "http:///x"] {
            config.repository.api_base = bad.to_string();
            assert!(
                matches!(ConfigLoader::validate(&config), Err(ConfigError::InvalidApiBase(_))),
                "{bad} should be rejected"
            );
        }
        config.repository.api_base = "http://127.0.0.1:1234".to_string();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_document() {
        let config = Config {
            document: String::new(),
            ..Default::default()
        };
        assert_eq!(ConfigLoader::validate(&config), Err(ConfigError::EmptyDocument));
    }

    #[test]
    fn test_validate_empty_token_env() {
        let config = Config {
            token_env: String::new(),
            ..Default::default()
        };
        assert_eq!(ConfigLoader::validate(&config), Err(ConfigError::EmptyTokenEnv));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert_eq!(ConfigLoader::validate(&config), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(ref level)) if level == "verbose"
        ));
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_overrides_win() {
        let overrides = ConfigOverrides {
            document: Some("plan.md".to_string()),
            dry_run: true,
            repo: Some("octo/hello".to_string()),
            delay_ms: Some(0),
        };
        let config = ConfigLoader::apply_overrides(Config::default(), &overrides).unwrap();
        assert_eq!(config.document, "plan.md");
        assert!(config.dry_run);
        assert_eq!(config.repository.slug(), "octo/hello");
        assert_eq!(config.rate_limit.delay_ms, 0);
    }

    #[test]
    fn test_overrides_reject_bad_slug() {
        let overrides = ConfigOverrides {
            repo: Some("no-slash".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ConfigLoader::apply_overrides(Config::default(), &overrides).unwrap_err(),
            ConfigError::InvalidSlug("no-slash".to_string())
        );
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut base = Config::default();
        base.dry_run = true;
        let config = ConfigLoader::apply_overrides(base, &ConfigOverrides::default()).unwrap();
        assert!(config.dry_run);
        assert_eq!(config.document, "issues.md");
    }

    #[test]
    fn test_hierarchical_merging() {
        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "repository:\n  owner: octo\n  name: base\nlogging:\n  level: info\n  format: json"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "repository:\n  name: local\nlogging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.repository.name, "local", "Override should win");
        assert_eq!(config.repository.owner, "octo", "Base value should persist");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_from_file_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http:\n  timeout_secs: 0").unwrap();
        file.flush().unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::ZeroTimeout));
    }
}
