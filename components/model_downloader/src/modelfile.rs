// components/model_downloader/src/modelfile.rs
use crate::types::DownloadError;
use model_hub::ModelId;
use std::path::{Path, PathBuf};

/// Default directory generated modelfiles are written to
pub const DEFAULT_MODELFILE_DIR: &str = "Modelfile";

const GGUF_EXTENSION: &str = "gguf";

/// An Ollama modelfile pointing at a downloaded GGUF file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modelfile {
    /// Model name to register with Ollama (the GGUF file stem)
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

impl Modelfile {
    /// Describe the modelfile for `file`, or `None` when it is not a `.gguf` file
    pub fn for_file(model: &ModelId, file: &str, modelfile_dir: &Path) -> Option<Self> {
        let file_path = Path::new(file);
        if file_path.extension()? != GGUF_EXTENSION {
            return None;
        }

        let file_name = file_path.file_name()?.to_string_lossy();
        let name = file_path.file_stem()?.to_string_lossy().into_owned();

        Some(Self {
            path: modelfile_dir.join(format!("{name}.modelfile")),
            content: format!("FROM ../{model}/{file_name}"),
            name,
        })
    }

    /// The command that registers this modelfile with Ollama
    pub fn create_command(&self) -> String {
        format!("ollama create {} -f {}", self.name, self.path.display())
    }

    pub async fn write(&self) -> Result<(), DownloadError> {
        let to_error = |source| DownloadError::Modelfile {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(to_error)?;
        }
        tokio::fs::write(&self.path, &self.content)
            .await
            .map_err(to_error)
    }
}
