// components/model_downloader/src/types.rs
use model_hub::HubError;
use std::path::PathBuf;
use thiserror::Error;

/// The selector value meaning "every file in the repository"
pub const ALL_FILES: &str = "all";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("No files selected")]
    EmptySelection,

    #[error("Failed to write modelfile {path}")]
    Modelfile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Hub(#[from] HubError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Which files of a model to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    All,
    Files(Vec<String>),
}

impl FileSelection {
    /// Parse the `--file` selector: `all`, or a comma separated list.
    ///
    /// Entries are trimmed and empty entries are dropped.
    pub fn parse(selector: &str) -> Result<Self, DownloadError> {
        if selector == ALL_FILES {
            return Ok(Self::All);
        }

        let files: Vec<String> = selector
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        if files.is_empty() {
            return Err(DownloadError::EmptySelection);
        }
        Ok(Self::Files(files))
    }
}

/// What happened to a single download target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { path: PathBuf },
    Skipped { path: PathBuf },
}
