// components/model_hub/src/modelscope.rs
use crate::types::{HubError, ModelId, RepoFile};
use crate::utils::{safe_join, verify_sha256, ChecksumWriter};
use crate::ModelHub;
use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://www.modelscope.cn";
pub const DEFAULT_REVISION: &str = "master";

/// Connection settings for a ModelScope compatible hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub endpoint: Url,
    pub revision: String,
    /// Access token, sent as the `m_session_id` cookie
    pub token: Option<String>,
    pub connect_timeout: Duration,
    /// Longest pause allowed between two reads; a transfer may take any time
    pub read_timeout: Duration,
}

impl HubConfig {
    pub fn new(endpoint: &str) -> Result<Self, HubError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| HubError::InvalidEndpoint(e.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(HubError::InvalidEndpoint(endpoint.to_string()));
        }

        Ok(Self {
            endpoint,
            revision: DEFAULT_REVISION.to_string(),
            token: None,
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(5 * 60),
        })
    }
}

pub struct ModelScope {
    client: reqwest::Client,
    config: HubConfig,
}

impl ModelScope {
    pub fn new(config: HubConfig) -> Result<Self, HubError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .user_agent(concat!("model-dl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    fn model_url(&self, model: &ModelId, tail: &[&str]) -> Result<Url, HubError> {
        let mut url = self.config.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| HubError::InvalidEndpoint(self.config.endpoint.to_string()))?
            .pop_if_empty()
            .extend(["api", "v1", "models", model.namespace(), model.name()])
            .extend(tail);
        Ok(url)
    }

    pub(crate) fn files_url(&self, model: &ModelId) -> Result<Url, HubError> {
        let mut url = self.model_url(model, &["repo", "files"])?;
        url.query_pairs_mut()
            .append_pair("Revision", &self.config.revision)
            .append_pair("Recursive", "True");
        Ok(url)
    }

    pub(crate) fn file_url(&self, model: &ModelId, path: &str) -> Result<Url, HubError> {
        let mut url = self.model_url(model, &["repo"])?;
        url.query_pairs_mut()
            .append_pair("Revision", &self.config.revision)
            .append_pair("FilePath", path);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, HubError> {
        tracing::debug!(%url, "GET");
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.config.token {
            request = request.header(reqwest::header::COOKIE, format!("m_session_id={token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HubError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ModelHub for ModelScope {
    async fn list_files(&self, model: &ModelId) -> Result<Vec<RepoFile>, HubError> {
        let body = self.get(self.files_url(model)?).await?.bytes().await?;
        parse_listing(&body)
    }

    async fn download_file(
        &self,
        model: &ModelId,
        file: &RepoFile,
        local_dir: &Path,
    ) -> Result<PathBuf, HubError> {
        let dest = safe_join(local_dir, &file.path)?;
        let parent = dest
            .parent()
            .ok_or_else(|| HubError::InvalidPath(file.path.clone()))?;
        tokio::fs::create_dir_all(parent).await?;

        let response = self.get(self.file_url(model, &file.path)?).await?;

        // Partial downloads never replace an existing file
        let (std_file, temp_path) = tempfile::Builder::new()
            .prefix(".download-")
            .tempfile_in(parent)?
            .into_parts();
        let mut out = tokio::fs::File::from_std(std_file);
        let mut checksum = ChecksumWriter::default();
        let mut written: u64 = 0;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            checksum.update(&chunk);
            out.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        out.flush().await?;
        drop(out);

        if let Some(expected) = &file.sha256 {
            verify_sha256(&file.path, expected, &checksum.finish())?;
        }

        temp_path.persist(&dest).map_err(|e| HubError::IoError(e.error))?;
        tracing::info!(file = %file.path, bytes = written, "downloaded {}", dest.display());

        Ok(dest)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Envelope<T> {
    code: Option<i64>,
    message: Option<String>,
    success: Option<bool>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FileListing {
    #[serde(default)]
    files: Vec<ListedFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListedFile {
    path: String,
    #[serde(rename = "Type")]
    kind: String,
    size: Option<u64>,
    sha256: Option<String>,
}

/// Parse a `repo/files` listing, keeping only blobs
pub(crate) fn parse_listing(body: &[u8]) -> Result<Vec<RepoFile>, HubError> {
    let envelope: Envelope<FileListing> = serde_json::from_slice(body)?;

    let code = envelope.code.unwrap_or(200);
    let listing = match envelope.data {
        Some(listing) if code == 200 && envelope.success != Some(false) => listing,
        _ => {
            return Err(HubError::Api {
                code,
                message: envelope
                    .message
                    .unwrap_or_else(|| "no file listing returned".to_string()),
            })
        }
    };

    Ok(listing
        .files
        .into_iter()
        .filter(|f| f.kind == "blob")
        .map(|f| RepoFile {
            path: f.path,
            size: f.size,
            sha256: f.sha256.filter(|s| !s.is_empty()),
        })
        .collect())
}
