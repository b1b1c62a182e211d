//! Error types for fetching results and loading configuration

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a failed submission, shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Timeout,
    Status,
    MalformedResponse,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Network => "network error",
            Self::Timeout => "request timed out",
            Self::Status => "service error",
            Self::MalformedResponse => "malformed response",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to reach checking service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Checking service did not answer within {secs}s")]
    Timeout { secs: u64 },

    #[error("Checking service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {reason}")]
    MalformedResponse { reason: String },
}

impl FetchError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) => FailureKind::Network,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::Status { .. } => FailureKind::Status,
            Self::MalformedResponse { .. } => FailureKind::MalformedResponse,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config override '{expr}': {reason}")]
    Override { expr: String, reason: String },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file already exists: {path} (use --override to replace it)")]
    AlreadyExists { path: PathBuf },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_kind_and_message() {
        let err = FetchError::malformed("record 0: expected 5 fields, found 4");
        assert_eq!(err.kind(), FailureKind::MalformedResponse);
        assert_eq!(
            err.to_string(),
            "Malformed response: record 0: expected 5 fields, found 4"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.kind(), FailureKind::Status);
        assert_eq!(err.to_string(), "Checking service returned 500: boom");
    }

    #[test]
    fn test_failure_kind_labels() {
        assert_eq!(FailureKind::Timeout.to_string(), "request timed out");
        assert_eq!(
            FailureKind::MalformedResponse.to_string(),
            "malformed response"
        );
    }
}
