//! Gateway abstraction over the remote inventory service.

use async_trait::async_trait;

use ventra_core::error::StockError;
use ventra_core::money::Money;

/// Price and display name for a product, as reported by the inventory
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    /// Current unit price.
    pub price: Money,
    /// Display name.
    pub name: String,
}

/// Remote inventory operations.
///
/// All three calls are single, non-transactional HTTP requests. A failed
/// call may or may not have partially applied on the remote side; there is
/// no idempotency key, so callers treat rollbacks as best-effort
/// compensations, not true undos.
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Requests the service reduce available stock of `product_id` by
    /// `quantity`.
    ///
    /// # Errors
    ///
    /// Returns a `StockError` with kind `Insufficient` when the service
    /// rejects the change, or `Unavailable` on upstream 5xx, timeout, or
    /// network failure.
    async fn decrement(&self, product_id: &str, quantity: i64) -> Result<(), StockError>;

    /// Requests the service change stock of `product_id` by the signed
    /// `delta` (positive increases stock, used for returns).
    ///
    /// # Errors
    ///
    /// Same failure taxonomy as [`decrement`](Self::decrement).
    async fn adjust(&self, product_id: &str, delta: i64) -> Result<(), StockError>;

    /// Fetches the current price and display name of a product. Read-only;
    /// never part of a compensation chain.
    ///
    /// # Errors
    ///
    /// Returns a `StockError` when the product is unknown or the service is
    /// unreachable.
    async fn fetch_product(&self, product_id: &str) -> Result<ProductInfo, StockError>;
}
