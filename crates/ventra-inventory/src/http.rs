//! Reqwest-backed implementation of [`InventoryGateway`].

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use ventra_core::error::StockError;
use ventra_core::money::Money;

use crate::config::InventoryConfig;
use crate::gateway::{InventoryGateway, ProductInfo};

/// Header carrying the optional shared secret for service-to-service trust.
const SHARED_SECRET_HEADER: &str = "x-service-secret";

/// Error body shape returned by the inventory service. Older deployments use
/// `error`, newer ones `detail`.
#[derive(Debug, Deserialize)]
struct UpstreamError {
    detail: Option<String>,
    error: Option<String>,
}

impl UpstreamError {
    fn message(self) -> Option<String> {
        self.detail.or(self.error)
    }
}

/// Success body of `GET /products/{id}`.
#[derive(Debug, Deserialize)]
struct ProductBody {
    price: f64,
    name: String,
}

/// HTTP client for the remote inventory service.
pub struct HttpInventoryClient {
    client: reqwest::Client,
    config: InventoryConfig,
}

impl HttpInventoryClient {
    /// Builds a client with the configured per-call timeout.
    ///
    /// # Errors
    ///
    /// Returns a `StockError` if the underlying HTTP client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(config: InventoryConfig) -> Result<Self, StockError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| StockError::unavailable("", format!("http client setup: {err}")))?;
        Ok(Self { client, config })
    }

    fn product_url(&self, product_id: &str, suffix: &str) -> String {
        format!("{}/products/{product_id}{suffix}", self.config.base_url)
    }

    /// Issues one stock-change POST and maps the response to the error
    /// taxonomy: 4xx means the service rejected the change, everything else
    /// short of success means it was unavailable.
    async fn post_stock_change(
        &self,
        product_id: &str,
        suffix: &str,
        quantity: i64,
    ) -> Result<(), StockError> {
        let mut request = self
            .client
            .post(self.product_url(product_id, suffix))
            .json(&json!({ "quantity": quantity }));
        if let Some(secret) = &self.config.shared_secret {
            request = request.header(SHARED_SECRET_HEADER, secret);
        }

        let response = request.send().await.map_err(|err| {
            StockError::unavailable(product_id, format!("inventory service unreachable: {err}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<UpstreamError>()
            .await
            .ok()
            .and_then(UpstreamError::message)
            .unwrap_or_else(|| format!("inventory service returned {status}"));

        if status.is_client_error() {
            Err(StockError::insufficient(product_id, message))
        } else {
            Err(StockError::unavailable(product_id, message))
        }
    }
}

#[async_trait]
impl InventoryGateway for HttpInventoryClient {
    async fn decrement(&self, product_id: &str, quantity: i64) -> Result<(), StockError> {
        self.post_stock_change(product_id, "/decrement", quantity)
            .await
    }

    async fn adjust(&self, product_id: &str, delta: i64) -> Result<(), StockError> {
        self.post_stock_change(product_id, "/adjust", delta).await
    }

    async fn fetch_product(&self, product_id: &str) -> Result<ProductInfo, StockError> {
        let mut request = self.client.get(self.product_url(product_id, ""));
        if let Some(secret) = &self.config.shared_secret {
            request = request.header(SHARED_SECRET_HEADER, secret);
        }

        let response = request.send().await.map_err(|err| {
            StockError::unavailable(product_id, format!("inventory service unreachable: {err}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StockError::unavailable(
                product_id,
                format!("product lookup returned {status}"),
            ));
        }

        let body: ProductBody = response.json().await.map_err(|err| {
            StockError::unavailable(product_id, format!("malformed product body: {err}"))
        })?;

        Ok(ProductInfo {
            price: Money::from_decimal(body.price),
            name: body.name,
        })
    }
}
