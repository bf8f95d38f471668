//! Domain errors for the plansync import pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a remote tracker operation.
///
/// These never abort a run: the resolver and the driver turn them into
/// absent results and failure tallies.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{operation} returned {status}: {body}")]
    RemoteStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{operation} request failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} response could not be decoded: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// HTTP status carried by the error, if the remote answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Fatal conditions detected before any remote interaction.
///
/// Every variant terminates the process with exit status 1.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("{var} environment variable is not set")]
    MissingCredential { var: String },

    #[error("Input document not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("Input document {} could not be read: {message}", path.display())]
    DocumentUnreadable { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP client could not be built: {0}")]
    HttpClient(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            operation: "json",
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_status_display() {
        let err = DomainError::RemoteStatus {
            operation: "create_label",
            status: 422,
            body: "Validation Failed".to_string(),
        };
        assert_eq!(err.to_string(), "create_label returned 422: Validation Failed");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_transport_has_no_status() {
        let err = DomainError::Transport {
            operation: "list_milestones",
            message: "connection refused".to_string(),
        };
        assert!(err.status().is_none());
    }

    #[test]
    fn test_setup_error_messages() {
        let err = SetupError::MissingCredential {
            var: "GITHUB_TOKEN".to_string(),
        };
        assert!(err.to_string().contains("GITHUB_TOKEN"));

        let err = SetupError::DocumentNotFound {
            path: PathBuf::from("issues.md"),
        };
        assert_eq!(err.to_string(), "Input document not found: issues.md");
    }
}
