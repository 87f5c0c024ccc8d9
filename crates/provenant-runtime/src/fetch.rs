//! Directive document retrieval.

use async_trait::async_trait;
use provenant_core::FetchConfig;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;

/// Default timeout for directive document requests (5 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default cap on the size of a directive document body.
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 512 * 1024;

/// Retrieves the raw text of a directive document.
#[async_trait]
pub trait DirectiveFetcher: Send + Sync {
    /// Fetch the document at `document_url`.
    async fn fetch(&self, document_url: &Url) -> Result<String, FetchError>;
}

/// HTTP(S) fetcher.
///
/// Only a `200 OK` response counts as a document; any other status is an
/// error the caller treats as "no document". Bodies are read incrementally and
/// abandoned once they exceed `max_document_bytes`.
pub struct HttpFetcher {
    client: reqwest::Client,
    max_document_bytes: u64,
}

impl HttpFetcher {
    /// Create a fetcher that identifies itself as `agent`.
    pub fn new(agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(agent)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self::with_client(client))
    }

    pub fn from_config(agent: &str, config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Self::new(agent, Duration::from_secs(config.timeout_secs))?
            .with_max_document_bytes(config.max_document_bytes))
    }

    /// Wrap a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    pub fn with_max_document_bytes(mut self, limit: u64) -> Self {
        self.max_document_bytes = limit;
        self
    }
}

#[async_trait]
impl DirectiveFetcher for HttpFetcher {
    async fn fetch(&self, document_url: &Url) -> Result<String, FetchError> {
        let mut response = self
            .client
            .get(document_url.clone())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let limit = self.max_document_bytes;
        if response.content_length().is_some_and(|len| len > limit) {
            return Err(FetchError::TooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(FetchError::Transport)? {
            if (body.len() + chunk.len()) as u64 > limit {
                return Err(FetchError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Fetcher that serves a fixed answer, for tests and offline evaluation.
#[derive(Debug, Clone)]
pub enum StaticFetcher {
    /// Every fetch returns this text.
    Document(String),
    /// Every fetch fails as if the server returned 404.
    Unavailable,
}

impl StaticFetcher {
    pub fn document(text: impl Into<String>) -> Self {
        Self::Document(text.into())
    }
}

#[async_trait]
impl DirectiveFetcher for StaticFetcher {
    async fn fetch(&self, _document_url: &Url) -> Result<String, FetchError> {
        match self {
            Self::Document(text) => Ok(text.clone()),
            Self::Unavailable => Err(FetchError::Status(404)),
        }
    }
}
