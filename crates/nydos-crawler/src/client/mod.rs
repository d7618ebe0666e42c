//! NY DOS public inquiry API client.
//!
//! One POST per call, JSON body, raw response bytes back. No retries, no rate
//! limiting: a failed call surfaces as a [`ClientError`] and the caller decides.

use reqwest::Client;
use serde::Serialize;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::{EntityIdentifier, EntityRecordRequest, SearchRequest};

/// The two registry operations the crawler depends on.
///
/// Both return the response body untouched so it can be persisted verbatim.
#[async_trait::async_trait]
pub trait RegistryApi: Send + Sync {
    /// Run an entity search.
    async fn search_entities(&self, request: &SearchRequest) -> ClientResult<Vec<u8>>;

    /// Fetch the full record of one entity.
    async fn get_entity_record(&self, id: EntityIdentifier) -> ClientResult<Vec<u8>>;
}

/// HTTP implementation of [`RegistryApi`].
#[derive(Clone)]
pub struct RegistryClient {
    /// HTTP client.
    client: Client,

    /// Search endpoint.
    search_url: String,

    /// Detail endpoint.
    detail_url: String,
}

impl RegistryClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
            detail_url: config.detail_url.clone(),
        })
    }

    /// Search endpoint in use.
    #[must_use]
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Detail endpoint in use.
    #[must_use]
    pub fn detail_url(&self) -> &str {
        &self.detail_url
    }

    /// Make a POST request with a JSON body and return the raw response body.
    async fn post<B>(&self, url: &str, body: &B) -> ClientResult<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let body_str = serde_json::to_string(body)?;

        let response = self
            .client
            .post(url)
            .body(body_str)
            .send()
            .await?;

        let response = Self::handle_response(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Map non-2xx statuses to errors.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl RegistryApi for RegistryClient {
    async fn search_entities(&self, request: &SearchRequest) -> ClientResult<Vec<u8>> {
        tracing::debug!(url = %self.search_url, term = %request.search_value, "Searching entities");
        self.post(&self.search_url, request).await
    }

    async fn get_entity_record(&self, id: EntityIdentifier) -> ClientResult<Vec<u8>> {
        tracing::debug!(url = %self.detail_url, %id, "Fetching entity record");
        self.post(&self.detail_url, &EntityRecordRequest::by_id(id)).await
    }
}

impl std::fmt::Debug for RegistryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryClient")
            .field("search_url", &self.search_url)
            .field("detail_url", &self.detail_url)
            .finish()
    }
}
