//! In-memory repository used by this crate's unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use ventra_core::error::DomainError;

use crate::domain::repository::SaleRepository;
use crate::domain::sale::Sale;

/// A `SaleRepository` backed by a hash map.
#[derive(Debug, Default)]
pub struct InMemorySaleRepository {
    sales: Mutex<HashMap<Uuid, Sale>>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct lookup without access checks, for assertions.
    pub fn get(&self, sale_id: Uuid) -> Option<Sale> {
        self.sales.lock().unwrap().get(&sale_id).cloned()
    }

    /// Snapshot of every stored sale, unordered.
    pub fn all(&self) -> Vec<Sale> {
        self.sales.lock().unwrap().values().cloned().collect()
    }
}

fn newest_first(mut sales: Vec<Sale>) -> Vec<Sale> {
    sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sales
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn insert(&self, sale: &Sale) -> Result<(), DomainError> {
        self.sales.lock().unwrap().insert(sale.id, sale.clone());
        Ok(())
    }

    async fn update(&self, sale: &Sale) -> Result<(), DomainError> {
        self.sales.lock().unwrap().insert(sale.id, sale.clone());
        Ok(())
    }

    async fn delete(&self, sale_id: Uuid) -> Result<(), DomainError> {
        self.sales.lock().unwrap().remove(&sale_id);
        Ok(())
    }

    async fn find_by_id(&self, sale_id: Uuid) -> Result<Option<Sale>, DomainError> {
        Ok(self.get(sale_id))
    }

    async fn find_all(&self) -> Result<Vec<Sale>, DomainError> {
        Ok(newest_first(self.all()))
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Sale>, DomainError> {
        let sales = self
            .all()
            .into_iter()
            .filter(|sale| sale.seller_id == seller_id)
            .collect();
        Ok(newest_first(sales))
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        seller_id: Option<Uuid>,
    ) -> Result<Vec<Sale>, DomainError> {
        let sales = self
            .all()
            .into_iter()
            .filter(|sale| sale.created_at >= start && sale.created_at <= end)
            .filter(|sale| seller_id.is_none_or(|id| sale.seller_id == id))
            .collect();
        Ok(newest_first(sales))
    }
}
