// bases/model_dl/src/output.rs
use model_downloader::{DownloadObserver, DownloadOutcome, Modelfile};
use std::path::Path;

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_summary(&self, outcomes: &[DownloadOutcome]) {
        if !self.verbose {
            return;
        }
        let downloaded = outcomes
            .iter()
            .filter(|o| matches!(o, DownloadOutcome::Downloaded { .. }))
            .count();
        println!(
            "Done: {} downloaded, {} skipped",
            downloaded,
            outcomes.len() - downloaded
        );
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        for line in error_lines(error) {
            eprintln!("{}", line);
        }
        if self.verbose {
            eprintln!("\nError details:\n{:?}", error);
        }
    }
}

/// The top-level message followed by every underlying cause
fn error_lines(error: &color_eyre::Report) -> Vec<String> {
    let mut chain = error.chain();
    let mut lines = Vec::new();
    if let Some(top) = chain.next() {
        lines.push(format!("Error: {}", top));
    }
    lines.extend(chain.map(|cause| format!("  caused by: {}", cause)));
    lines
}

impl DownloadObserver for OutputHandler {
    fn files_planned(&self, count: usize) {
        println!("{} files to download", count);
    }

    fn skipped(&self, path: &Path) {
        println!("{} already exists, skipping download", path.display());
    }

    fn started(&self, what: &str, dest: &Path) {
        println!("Downloading {} to {}", what, dest.display());
    }

    fn finished(&self, path: &Path) {
        println!("Downloaded {}", path.display());
    }

    fn modelfile_written(&self, modelfile: &Modelfile) {
        println!("{}", modelfile.create_command());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::{eyre, WrapErr};

    #[test]
    fn test_error_lines_include_every_cause() {
        let error = Err::<(), _>(eyre!("Invalid repository path '../x.gguf'"))
            .wrap_err("Download of org/model failed")
            .unwrap_err();

        assert_eq!(
            error_lines(&error),
            vec![
                "Error: Download of org/model failed".to_string(),
                "  caused by: Invalid repository path '../x.gguf'".to_string(),
            ]
        );
    }

    #[test]
    fn test_error_lines_single_error() {
        assert_eq!(
            error_lines(&eyre!("Invalid model id 'x'")),
            vec!["Error: Invalid model id 'x'".to_string()]
        );
    }
}
