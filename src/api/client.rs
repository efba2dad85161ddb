use std::time::Duration;

use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::time::timeout;

use crate::api::envelope::{Envelope, WireEnvelope};
use crate::api::error::ApiError;
use crate::config::ApiConfig;

/// Undecoded response, used for binary downloads.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub bytes: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Thin JSON client bound to one API origin.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.timeout_seconds.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` (which may carry its own query) onto the base URL and
    /// appends `query` pairs, percent-encoded.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        fallback: &str,
    ) -> Envelope<T> {
        self.call(Method::GET, path, query, None, fallback).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, fallback: &str) -> Envelope<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match serde_json::to_value(body) {
            Ok(body) => self.call(Method::POST, path, &[], Some(body), fallback).await,
            Err(e) => ApiError::from(e).into(),
        }
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, fallback: &str) -> Envelope<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match serde_json::to_value(body) {
            Ok(body) => self.call(Method::PUT, path, &[], Some(body), fallback).await,
            Err(e) => ApiError::from(e).into(),
        }
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Envelope<T> {
        self.call(Method::DELETE, path, &[], None, fallback).await
    }

    /// GET without envelope decoding.
    pub async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, ApiError> {
        self.send(Method::GET, path, query, None).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        fallback: &str,
    ) -> Envelope<T> {
        match self.execute(method.clone(), path, query, body, fallback).await {
            Ok(envelope) => {
                if !envelope.success {
                    tracing::warn!(
                        method = %method,
                        path = %path,
                        status = envelope.status_code,
                        message = %envelope.message,
                        "Backend rejected request"
                    );
                }
                envelope
            }
            Err(err) => {
                tracing::warn!(
                    method = %method,
                    path = %path,
                    error_type = err.error_type(),
                    error = %err,
                    "Backend call failed"
                );
                err.into()
            }
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        fallback: &str,
    ) -> Result<Envelope<T>, ApiError> {
        let raw = self.send(method, path, query, body).await?;

        if raw.bytes.is_empty() {
            return Ok(Envelope::failure(raw.status, fallback));
        }

        match serde_json::from_slice::<WireEnvelope>(&raw.bytes) {
            Ok(wire) => Ok(Envelope::from_wire(raw.status, wire, fallback)),
            Err(e) if raw.is_success() => Err(ApiError::Body(e.to_string())),
            Err(_) => Ok(Envelope::failure(
                raw.status,
                format!("{} (HTTP {})", fallback, raw.status),
            )),
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError> {
        let url = self.url(path, query)?;
        tracing::debug!(method = %method, url = %url, "Backend request");

        let mut builder = self.client.request(method, url.clone());
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let exchange = async {
            let resp = builder.send().await.map_err(|e| ApiError::Connection {
                url: url.to_string(),
                source: e,
            })?;

            let status = resp.status().as_u16();
            let header = |name: HeaderName| {
                resp.headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            let content_type = header(CONTENT_TYPE);
            let content_disposition = header(CONTENT_DISPOSITION);

            let bytes = resp
                .bytes()
                .await
                .map_err(|e| ApiError::Body(format!("Failed to read response body: {}", e)))?;

            Ok::<_, ApiError>(RawResponse {
                status,
                content_type,
                content_disposition,
                bytes: bytes.to_vec(),
            })
        };

        match timeout(self.request_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout {
                duration: self.request_timeout.as_secs(),
            }),
        }
    }
}
