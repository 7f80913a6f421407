// components/model_hub/src/types.rs
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("Invalid model id '{0}': expected <namespace>/<name>")]
    InvalidModelId(String),

    #[error("Invalid repository path '{0}'")]
    InvalidPath(String),

    #[error("Invalid hub endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Request to {url} failed with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Hub API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed hub response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A model identifier of the form `<namespace>/<name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId {
    namespace: String,
    name: String,
}

impl ModelId {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory for this model below `root`, i.e. `root/<namespace>/<name>`
    pub fn local_dir(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(&self.namespace).join(&self.name)
    }
}

impl FromStr for ModelId {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HubError::InvalidModelId(s.to_string());
        let (namespace, name) = s.split_once('/').ok_or_else(invalid)?;

        let valid_part = |part: &str| {
            !part.is_empty()
                && part != "."
                && part != ".."
                && !part.contains('/')
                && !part.contains('\\')
                && !part.chars().any(char::is_whitespace)
        };
        if !valid_part(namespace) || !valid_part(name) {
            return Err(invalid());
        }

        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A file stored in a model repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    /// Path relative to the repository root, `/` separated
    pub path: String,

    /// Size in bytes, when the hub reported it
    pub size: Option<u64>,

    /// Lowercase hex SHA-256, when the hub reported it
    pub sha256: Option<String>,
}

impl RepoFile {
    /// A file known only by its path
    pub fn named(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size: None,
            sha256: None,
        }
    }
}
