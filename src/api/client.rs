//! HTTP client for the shop API.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::api::types::{CatalogPage, ErrorBody, OrderPayload, OrderReceipt};
use crate::config::ShopConfig;

/// The network collaborator the checkout flow depends on.
///
/// Both operations are asynchronous and fallible. Implementations are used
/// through generics (the session runtime is parameterized over its api), so
/// the trait does not need to be object-safe.
#[allow(async_fn_in_trait)]
pub trait ShopApi {
    /// `GET /product`: the full product list.
    async fn fetch_catalog(&self) -> Result<CatalogPage, ApiError>;

    /// `POST /order`: submit a composed order.
    async fn submit_order(&self, order: &OrderPayload) -> Result<OrderReceipt, ApiError>;
}

/// [`ShopApi`] over reqwest with JSON bodies.
pub struct HttpShopApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpShopApi {
    pub fn new(config: &ShopConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .expect("Failed to build shop api client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ShopApi for HttpShopApi {
    async fn fetch_catalog(&self) -> Result<CatalogPage, ApiError> {
        let url = self.url("/product");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        decode_response(&url, response).await
    }

    async fn submit_order(&self, order: &OrderPayload) -> Result<OrderReceipt, ApiError> {
        let url = self.url("/order");
        let response = self
            .client
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| transport(&url, e))?;
        decode_response(&url, response).await
    }
}

fn transport(url: &str, source: reqwest::Error) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        source,
    }
}

/// Turn a response into the expected JSON type, surfacing the server's
/// `{"error": ...}` body on non-2xx statuses.
async fn decode_response<T: DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport(url, e))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
