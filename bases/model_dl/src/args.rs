// bases/model_dl/src/args.rs
use clap::Parser;
use model_downloader::{ALL_FILES, DEFAULT_MODELFILE_DIR};
use model_hub::{DEFAULT_ENDPOINT, DEFAULT_REVISION};
use std::path::PathBuf;

/// Download model files from ModelScope
#[derive(Parser, Debug)]
#[command(name = "model-dl", author, version, about, long_about = None)]
pub struct Args {
    /// Model id, e.g. Qwen/Qwen2.5-0.5B-Instruct-GGUF
    #[arg(short, long)]
    pub model: String,

    /// Files to download: `all`, or a comma separated list such as a,b,c
    #[arg(short, long, default_value = ALL_FILES)]
    pub file: String,

    /// Directory to download into; the model is stored below <dir>/<model>
    #[arg(short, long, env = "MODEL_DL_DIR", default_value = ".")]
    pub download_dir: PathBuf,

    /// Write an Ollama modelfile for every selected .gguf file
    #[arg(short, long)]
    pub generate_modelfile: bool,

    /// Download even if the target already exists
    #[arg(short = 'F', long)]
    pub force: bool,

    /// Directory generated modelfiles are written to
    #[arg(long, default_value = DEFAULT_MODELFILE_DIR)]
    pub modelfile_dir: PathBuf,

    /// Hub base URL
    #[arg(long, env = "MODELSCOPE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Repository revision (branch or tag)
    #[arg(long, default_value = DEFAULT_REVISION)]
    pub revision: String,

    /// Access token for private models
    #[arg(long, env = "MODELSCOPE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
