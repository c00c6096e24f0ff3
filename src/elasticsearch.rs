use crate::client::{IndexAck, IndexClient};
use crate::document::{Document, IndexTarget};
use crate::error::{ConfigError, IndexError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Connection settings for [`ElasticsearchClient`]. One client talks to
/// exactly one host.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// `http` or `https`.
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Optional per-request timeout, enforced by the HTTP client.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Base URL of the node, e.g. `https://127.0.0.1:9200`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

/// [`IndexClient`] speaking the Elasticsearch document API over HTTP.
///
/// Each call is a single `POST /{index}/{type}` with the document as a
/// JSON body and HTTP basic auth; the backend assigns the document id.
#[derive(Clone)]
pub struct ElasticsearchClient {
    client: Client,
    config: ClientConfig,
}

impl ElasticsearchClient {
    /// Construct a client for the host described by `config`.
    ///
    /// **Returns**
    /// - `Err(ConfigError::Client)` if the underlying HTTP client cannot be
    ///   built (e.g. TLS backend initialisation failed).
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, target: &IndexTarget) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url(),
            urlencoding::encode(&target.index),
            urlencoding::encode(target.doc_type)
        )
    }
}

#[async_trait]
impl IndexClient for ElasticsearchClient {
    async fn index(&self, target: &IndexTarget, document: &Document) -> Result<IndexAck, IndexError> {
        let url = self.endpoint(target);
        tracing::trace!(%url, "indexing document");

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(document)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(IndexError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        // The document is stored once the status is 2xx; an unreadable ack
        // body only loses the id.
        let body = resp.bytes().await?;
        match serde_json::from_slice::<IndexAck>(&body) {
            Ok(ack) => Ok(ack),
            Err(e) => {
                tracing::debug!(error = %e, "index ack body not understood");
                Ok(IndexAck::default())
            }
        }
    }
}
