// components/model_hub/src/lib.rs
mod modelscope;
mod types;
mod utils;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use modelscope::{HubConfig, ModelScope, DEFAULT_ENDPOINT, DEFAULT_REVISION};
pub use types::{HubError, ModelId, RepoFile};
pub use utils::safe_join;

/// A remote repository of model artifacts
#[async_trait]
pub trait ModelHub: Send + Sync {
    /// List every file stored in the model repository
    async fn list_files(&self, model: &ModelId) -> Result<Vec<RepoFile>, HubError>;

    /// Download one file to `local_dir/<file.path>`, returning the written path
    async fn download_file(
        &self,
        model: &ModelId,
        file: &RepoFile,
        local_dir: &Path,
    ) -> Result<PathBuf, HubError>;

    /// Download the whole repository into `local_dir`, one file at a time
    async fn snapshot_download(
        &self,
        model: &ModelId,
        local_dir: &Path,
    ) -> Result<Vec<PathBuf>, HubError> {
        let files = self.list_files(model).await?;
        tracing::debug!(model = %model, count = files.len(), "snapshot listing");

        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            written.push(self.download_file(model, file, local_dir).await?);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Writes the file path as the file body
    struct HubStub {
        files: Vec<RepoFile>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ModelHub for HubStub {
        async fn list_files(&self, _model: &ModelId) -> Result<Vec<RepoFile>, HubError> {
            Ok(self.files.clone())
        }

        async fn download_file(
            &self,
            _model: &ModelId,
            file: &RepoFile,
            local_dir: &Path,
        ) -> Result<PathBuf, HubError> {
            self.requested.lock().unwrap().push(file.path.clone());
            let dest = safe_join(local_dir, &file.path)?;
            tokio::fs::create_dir_all(dest.parent().unwrap()).await?;
            tokio::fs::write(&dest, file.path.as_bytes()).await?;
            Ok(dest)
        }
    }

    #[tokio::test]
    async fn test_snapshot_downloads_every_listed_file_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let hub = HubStub {
            files: vec![RepoFile::named("config.json"), RepoFile::named("sub/w.gguf")],
            requested: Mutex::new(Vec::new()),
        };
        let model: ModelId = "org/m".parse().unwrap();

        let written = hub
            .snapshot_download(&model, temp_dir.path())
            .await
            .unwrap();

        assert_eq!(
            *hub.requested.lock().unwrap(),
            vec!["config.json".to_string(), "sub/w.gguf".to_string()]
        );
        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("sub/w.gguf")).unwrap(),
            "sub/w.gguf"
        );
    }
}
