// components/model_hub/src/utils.rs
use crate::types::HubError;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};

/// Join a `/` separated repository path onto `root`.
///
/// Absolute paths, `..` and empty components are refused so a file can never
/// land outside of `root`.
pub fn safe_join(root: &Path, repo_path: &str) -> Result<PathBuf, HubError> {
    let invalid = || HubError::InvalidPath(repo_path.to_string());

    if repo_path.is_empty() || repo_path.starts_with('/') || repo_path.contains('\\') {
        return Err(invalid());
    }

    let mut joined = root.to_path_buf();
    for part in repo_path.split('/') {
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(segment)), None) => joined.push(segment),
            _ => return Err(invalid()),
        }
    }
    Ok(joined)
}

/// Incremental SHA-256 over streamed chunks
#[derive(Default)]
pub struct ChecksumWriter {
    hasher: Sha256,
}

impl ChecksumWriter {
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

/// Compare a computed digest against the one the hub advertised
pub fn verify_sha256(path: &str, expected: &str, actual: &str) -> Result<(), HubError> {
    if expected.eq_ignore_ascii_case(actual) {
        Ok(())
    } else {
        Err(HubError::ChecksumMismatch {
            path: path.to_string(),
            expected: expected.to_lowercase(),
            actual: actual.to_string(),
        })
    }
}
