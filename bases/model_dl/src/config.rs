// bases/model_dl/src/config.rs
use crate::args::Args;
use color_eyre::Result;
use model_downloader::{DownloadOptions, FileSelection};
use model_hub::{HubConfig, ModelId};

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub model: ModelId,
    pub selection: FileSelection,
    pub options: DownloadOptions,
    pub hub: HubConfig,
}

impl Config {
    /// Create configuration from CLI arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let model: ModelId = args.model.parse()?;
        let selection = FileSelection::parse(&args.file)?;

        let mut hub = HubConfig::new(&args.endpoint)?;
        hub.revision = args.revision;
        hub.token = args.token.filter(|t| !t.is_empty());

        let options = DownloadOptions {
            download_dir: args.download_dir,
            force: args.force,
            generate_modelfile: args.generate_modelfile,
            modelfile_dir: args.modelfile_dir,
        };

        Ok(Self {
            model,
            selection,
            options,
            hub,
        })
    }
}
