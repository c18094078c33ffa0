//! REST backend adapter
//!
//! One [`HttpBackend`] implements every port. Status mapping:
//!
//! - 2xx → success
//! - 404 → `Error::NotFound`
//! - any other status → `Error::Remote { status: Some(code), body }`
//! - transport failure or timeout → `Error::Remote { status: None, .. }`
//!
//! No retries happen here. Each request is bounded by the client timeout.

mod assets;
mod assignments;
mod batch;

use std::time::Duration;

use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;
use crate::core::error::{Error, Result};

/// Longest response body kept in an error message
const MAX_ERROR_BODY: usize = 500;

/// HTTP client for the asset backend
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl HttpBackend {
    /// Create a client from backend configuration
    ///
    /// # Errors
    ///
    /// `Validation` when the base URL cannot be parsed or the client cannot
    /// be built.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::validation(format!("invalid base_url '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::validation(format!("base_url '{}' cannot be a base", config.base_url)));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::validation(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_token: config.api_token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Base URL every path is resolved against
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL from path segments, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!("{method} {url}");
        let request = self.client.request(method, url);
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and map failures
    ///
    /// `entity` and `id` name the record in a not-found error.
    async fn send(&self, request: RequestBuilder, entity: &'static str, id: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::remote(None, format!("timed out: {e}"))
            } else {
                Error::remote(None, e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                entity,
                id: id.to_string(),
            });
        }

        Err(Error::remote(Some(status.as_u16()), error_body(response.text().await)))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        entity: &'static str,
        id: &str,
    ) -> Result<T> {
        let response = self.send(request, entity, id).await?;
        let status = response.status().as_u16();
        response
            .json()
            .await
            .map_err(|e| Error::remote(Some(status), format!("invalid response body: {e}")))
    }
}

/// Truncated error body, or the reason it could not be read
fn error_body<E: std::fmt::Display>(read: std::result::Result<String, E>) -> String {
    let body = read.unwrap_or_else(|e| format!("<unreadable body: {e}>"));
    body.chars().take(MAX_ERROR_BODY).collect()
}
