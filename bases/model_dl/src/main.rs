// bases/model_dl/src/main.rs
mod app;
mod args;
mod config;
mod output;

use app::App;
use args::Args;
use clap::Parser;
use color_eyre::Result;
use config::Config;
use output::OutputHandler;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let default_filter = if args.verbose {
        "model_dl=debug,model_downloader=debug,model_hub=debug"
    } else {
        "model_dl=info,model_downloader=info,model_hub=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = Arc::new(OutputHandler::new(args.verbose));
    let result = match Config::from_args(args) {
        Ok(config) => App::new(config, output.clone()).run().await,
        Err(error) => Err(error),
    };

    if let Err(error) = result {
        output.print_error(&error);
        std::process::exit(1);
    }
    Ok(())
}
