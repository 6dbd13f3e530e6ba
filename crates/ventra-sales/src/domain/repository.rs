//! Sale persistence abstraction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use ventra_core::error::DomainError;

use super::sale::Sale;

/// Repository trait for loading and storing sales.
///
/// Mutations are only invoked after the reconciliation engine has confirmed
/// the matching stock changes with the inventory service; local state is
/// never updated ahead of remote stock.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Persists a newly created sale.
    async fn insert(&self, sale: &Sale) -> Result<(), DomainError>;

    /// Replaces a persisted sale's line items and total.
    async fn update(&self, sale: &Sale) -> Result<(), DomainError>;

    /// Removes a sale.
    async fn delete(&self, sale_id: Uuid) -> Result<(), DomainError>;

    /// Loads one sale, or `None` when it does not exist.
    async fn find_by_id(&self, sale_id: Uuid) -> Result<Option<Sale>, DomainError>;

    /// Lists every sale, newest first.
    async fn find_all(&self) -> Result<Vec<Sale>, DomainError>;

    /// Lists one seller's sales, newest first.
    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Sale>, DomainError>;

    /// Lists sales created within the inclusive `[start, end]` range,
    /// newest first, optionally scoped to one seller.
    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        seller_id: Option<Uuid>,
    ) -> Result<Vec<Sale>, DomainError>;
}
