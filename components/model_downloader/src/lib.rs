// components/model_downloader/src/lib.rs
mod modelfile;
mod types;

use model_hub::{safe_join, ModelHub, ModelId, RepoFile};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use modelfile::{Modelfile, DEFAULT_MODELFILE_DIR};
pub use types::{DownloadError, DownloadOutcome, FileSelection, ALL_FILES};

/// Receives progress notifications while downloads run
pub trait DownloadObserver {
    fn files_planned(&self, _count: usize) {}
    fn skipped(&self, _path: &Path) {}
    fn started(&self, _what: &str, _dest: &Path) {}
    fn finished(&self, _path: &Path) {}
    fn modelfile_written(&self, _modelfile: &Modelfile) {}
}

/// Observer that ignores every notification
pub struct Silent;

impl DownloadObserver for Silent {}

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Root directory; a model lands in `<download_dir>/<namespace>/<name>`
    pub download_dir: PathBuf,

    /// Download even when the target already exists
    pub force: bool,

    /// Write an Ollama modelfile for every selected `.gguf` file
    pub generate_modelfile: bool,

    pub modelfile_dir: PathBuf,
}

impl DownloadOptions {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            force: false,
            generate_modelfile: false,
            modelfile_dir: PathBuf::from(DEFAULT_MODELFILE_DIR),
        }
    }
}

pub struct ModelDownloader {
    hub: Arc<dyn ModelHub>,
    observer: Arc<dyn DownloadObserver + Send + Sync>,
    options: DownloadOptions,
}

impl ModelDownloader {
    pub fn new(hub: Arc<dyn ModelHub>, options: DownloadOptions) -> Self {
        Self::new_with_observer(hub, options, Arc::new(Silent))
    }

    pub fn new_with_observer(
        hub: Arc<dyn ModelHub>,
        options: DownloadOptions,
        observer: Arc<dyn DownloadObserver + Send + Sync>,
    ) -> Self {
        Self {
            hub,
            observer,
            options,
        }
    }

    /// Local directory the given model is stored in
    pub fn model_dir(&self, model: &ModelId) -> PathBuf {
        model.local_dir(&self.options.download_dir)
    }

    pub async fn run(
        &self,
        model: &ModelId,
        selection: &FileSelection,
    ) -> Result<Vec<DownloadOutcome>, DownloadError> {
        match selection {
            FileSelection::All => Ok(vec![self.download_all(model).await?]),
            FileSelection::Files(files) => self.download_files(model, files).await,
        }
    }

    /// Snapshot the whole repository unless its directory already exists
    pub async fn download_all(&self, model: &ModelId) -> Result<DownloadOutcome, DownloadError> {
        let target = self.model_dir(model);

        if self.should_skip(&target).await? {
            return Ok(DownloadOutcome::Skipped { path: target });
        }

        self.observer.started(&model.to_string(), &target);
        let written = self.hub.snapshot_download(model, &target).await?;
        tracing::info!(model = %model, files = written.len(), "snapshot complete");
        self.observer.finished(&target);

        Ok(DownloadOutcome::Downloaded { path: target })
    }

    /// Fetch the listed files one after another
    pub async fn download_files(
        &self,
        model: &ModelId,
        files: &[String],
    ) -> Result<Vec<DownloadOutcome>, DownloadError> {
        if files.is_empty() {
            return Err(DownloadError::EmptySelection);
        }

        let model_dir = self.model_dir(model);
        let targets = files
            .iter()
            .map(|file| safe_join(&model_dir, file).map(|target| (file, target)))
            .collect::<Result<Vec<_>, _>>()?;

        self.observer.files_planned(files.len());

        let mut outcomes = Vec::with_capacity(targets.len());
        for (file, target) in targets {
            if self.options.generate_modelfile {
                self.generate_modelfile(model, file).await?;
            }

            if self.should_skip(&target).await? {
                outcomes.push(DownloadOutcome::Skipped { path: target });
                continue;
            }

            self.observer.started(file, &target);
            let path = self
                .hub
                .download_file(model, &RepoFile::named(file.as_str()), &model_dir)
                .await?;
            self.observer.finished(&path);
            outcomes.push(DownloadOutcome::Downloaded { path });
        }

        Ok(outcomes)
    }

    async fn generate_modelfile(&self, model: &ModelId, file: &str) -> Result<(), DownloadError> {
        if let Some(modelfile) = Modelfile::for_file(model, file, &self.options.modelfile_dir) {
            modelfile.write().await?;
            tracing::debug!(path = %modelfile.path.display(), "modelfile written");
            self.observer.modelfile_written(&modelfile);
        }
        Ok(())
    }

    async fn should_skip(&self, target: &Path) -> Result<bool, DownloadError> {
        if !tokio::fs::try_exists(target).await? {
            return Ok(false);
        }
        if self.options.force {
            tracing::info!("{} exists, overwriting", target.display());
            return Ok(false);
        }

        tracing::warn!("{} already exists, skipping (use --force to overwrite)", target.display());
        self.observer.skipped(target);
        Ok(true)
    }
}
