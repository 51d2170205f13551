use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use jsonapi_envelope::{Document, Resource, MEDIA_TYPE};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT},
    StatusCode,
};
use tracing::{error, info, warn};

use super::{ProductCatalog, RetryPolicy};
use crate::models::{RemoteProduct, RemoteProductAttributes};

/// Sent as `X-API-KEY`; header names are case-insensitive.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Everything the client needs, fixed at construction.
#[derive(Debug, Clone)]
pub struct ProductClientConfig {
    /// Collection URL, e.g. `http://products:8081/api/v1/products`.
    pub base_url: String,
    pub api_key: String,
    /// Applied both to connecting and to the whole request.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

/// Result of one GET against the product service.
#[derive(Debug)]
enum Attempt {
    Found(RemoteProduct),
    /// 404, empty body or `data: null`.
    NotFound,
    /// 4xx other than 404. Repeating the same request cannot help.
    ClientError(StatusCode),
    /// 2xx whose body is not a `products` document, or an unexpected status.
    Malformed(String),
    /// 5xx or transport failure (timeout, refused connection, reset).
    Retryable(String),
}

#[derive(Debug, Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl ProductClient {
    pub fn new(config: ProductClientConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .context("PRODUCT_SERVICE_API_KEY is not a valid header value")?;
        api_key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("failed to build product service HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry,
        })
    }

    async fn attempt(&self, product_id: i64) -> Attempt {
        let url = format!("{}/{}", self.base_url, product_id);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => return Attempt::Retryable(err.to_string()),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Attempt::NotFound;
        }
        if status.is_client_error() {
            return Attempt::ClientError(status);
        }
        if status.is_server_error() {
            return Attempt::Retryable(format!("product service returned {status}"));
        }
        if !status.is_success() {
            return Attempt::Malformed(format!("unexpected status {status}"));
        }

        match response.bytes().await {
            Ok(body) => decode_product(product_id, &body),
            Err(err) => Attempt::Retryable(err.to_string()),
        }
    }
}

fn decode_product(product_id: i64, body: &[u8]) -> Attempt {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Attempt::NotFound;
    }
    match serde_json::from_slice::<Document<Option<Resource<RemoteProductAttributes>>>>(body) {
        Ok(Document { data: Some(resource), .. }) => {
            Attempt::Found(RemoteProduct::from_attributes(product_id, resource.attributes))
        }
        Ok(Document { data: None, .. }) => Attempt::NotFound,
        Err(err) => Attempt::Malformed(err.to_string()),
    }
}

#[async_trait]
impl ProductCatalog for ProductClient {
    async fn fetch_product(&self, product_id: i64) -> Option<RemoteProduct> {
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 1;

        loop {
            info!(product_id, attempt, max_attempts, "Fetching product from product service");

            let reason = match self.attempt(product_id).await {
                Attempt::Found(product) => {
                    info!(product_id, attempt, name = %product.name, "Product service returned product");
                    return Some(product);
                }
                Attempt::NotFound => {
                    warn!(product_id, attempt, "Product not found in product service; not retrying");
                    return None;
                }
                Attempt::ClientError(status) => {
                    error!(product_id, attempt, %status, "Product service rejected the request; not retrying");
                    return None;
                }
                Attempt::Malformed(reason) => {
                    error!(product_id, attempt, %reason, "Unreadable product service response; not retrying");
                    return None;
                }
                Attempt::Retryable(reason) => reason,
            };

            if !self.retry.allows_retry_after(attempt) {
                error!(
                    product_id,
                    attempts = attempt,
                    last_error = %reason,
                    "All attempts to reach product service failed; treating product as not found"
                );
                return None;
            }

            let delay = self.retry.delay_after(attempt);
            warn!(
                product_id,
                attempt,
                error = %reason,
                retry_in_ms = delay.as_millis() as u64,
                "Product service call failed; will retry"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
