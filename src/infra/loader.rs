//! One-shot loader for the analysis report.
//!
//! - Reads the report from an HTTP(S) URL or a local file.
//! - Parses and validates it into an [`AnalysisDocument`].
//! - Never retries; a failed load stays failed for the session.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::{AnalysisDocument, LoadState, ValidationError};

pub const DEFAULT_DATA_URL: &str = "http://localhost:8080/data/latest.json";
const USER_AGENT: &str = concat!("delivery-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed analysis payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid analysis: {0}")]
    Validation(#[from] ValidationError),
}

/// Where the analysis report lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Http(Url),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are URLs, anything else is a file path.
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(DataSource::Http(Url::parse(trimmed)?))
        } else {
            Ok(DataSource::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Clone)]
pub struct AnalysisLoader {
    http: Client,
    source: DataSource,
}

impl AnalysisLoader {
    pub fn new(source: DataSource) -> Result<Self, LoadError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, source })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Reads, parses and validates the report.
    pub async fn fetch(&self) -> Result<AnalysisDocument, LoadError> {
        let bytes = match &self.source {
            DataSource::Http(url) => self.fetch_http(url).await?,
            DataSource::File(path) => read_file(path).await?,
        };
        debug!(bytes = bytes.len(), source = %self.source, "analysis payload received");
        let document = parse_document(&bytes)?;
        let missing = document.missing_cities();
        if !missing.is_empty() {
            warn!("report lists cities without analysis records: {}", missing.join(", "));
        }
        Ok(document)
    }

    /// Like [`fetch`](Self::fetch) but folds every error into [`LoadState::Failed`].
    pub async fn load(&self) -> LoadState {
        match self.fetch().await {
            Ok(document) => {
                info!(
                    cities = document.len(),
                    source = %self.source,
                    "analysis loaded"
                );
                LoadState::Ready(Arc::new(document))
            }
            Err(err) => {
                error!(source = %self.source, "error loading analysis: {err}");
                LoadState::Failed(err.to_string())
            }
        }
    }

    async fn fetch_http(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        let response = self.http.get(url.clone()).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_document(bytes: &[u8]) -> Result<AnalysisDocument, LoadError> {
    let document: AnalysisDocument = serde_json::from_slice(bytes)?;
    document.validate()?;
    Ok(document)
}
