// bases/model_dl/src/app.rs
use crate::config::Config;
use crate::output::OutputHandler;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use model_downloader::ModelDownloader;
use model_hub::ModelScope;
use std::sync::Arc;

pub struct App {
    config: Config,
    output: Arc<OutputHandler>,
}

impl App {
    pub fn new(config: Config, output: Arc<OutputHandler>) -> Self {
        Self { config, output }
    }

    pub async fn run(&self) -> Result<()> {
        let hub = ModelScope::new(self.config.hub.clone())
            .wrap_err("Failed to create hub client")?;
        let downloader = ModelDownloader::new_with_observer(
            Arc::new(hub),
            self.config.options.clone(),
            self.output.clone(),
        );

        let model = &self.config.model;
        tracing::debug!(
            model = %model,
            endpoint = %self.config.hub.endpoint,
            revision = %self.config.hub.revision,
            "starting"
        );

        let outcomes = downloader
            .run(model, &self.config.selection)
            .await
            .wrap_err_with(|| format!("Download of {} failed", model))?;

        self.output.print_summary(&outcomes);
        Ok(())
    }
}
