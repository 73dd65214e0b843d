use super::types::{CategorySummary, Product};
use futures::StreamExt;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Instant;
use thiserror::Error;
use url::Url;

/// Upper bound on a catalog response body.
pub const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Default public catalog service.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or body-read failure
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Body was not the expected JSON array
    #[error("Malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Limit redirects to 3 hops and refuse loops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev.as_str() == url.as_str()) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(to = %url, hop = attempt.previous().len() + 1, "Following redirect");
        attempt.follow()
    })
}

/// Read-only client for the catalog service.
///
/// Issues exactly two kinds of request, both `GET`. Product edits and
/// deletions never leave the process.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base: Url,
}

impl CatalogClient {
    /// Build a client rooted at `base_url` (e.g. `https://fakestoreapi.com`).
    ///
    /// Only `http` and `https` bases are accepted.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                base.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .redirect(create_redirect_policy())
            .user_agent(concat!("catview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET {base}/products`: the whole catalog in server order.
    pub async fn fetch_all_products(&self) -> Result<Vec<Product>, FetchError> {
        let url = self.endpoint(&["products"])?;
        self.get_json(url).await
    }

    /// `GET {base}/products/category/{name}`: items of one fixed category.
    ///
    /// `name` is pushed as a single path segment, so spaces and slashes in a
    /// category name are percent-encoded rather than changing the route.
    pub async fn fetch_category(&self, name: &str) -> Result<Vec<CategorySummary>, FetchError> {
        let url = self.endpoint(&["products", "category", name])?;
        self.get_json(url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let started = Instant::now();
        tracing::debug!(url = %url, "Fetching catalog resource");

        let response = self.http.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let body = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        let parsed = serde_json::from_slice(&body)?;

        tracing::debug!(
            url = %url,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog resource fetched"
        );
        Ok(parsed)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Content-Length is advisory; the streamed total is checked as well
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
