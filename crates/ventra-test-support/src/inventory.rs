//! Scriptable `InventoryGateway` double that records every remote call.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use ventra_core::error::StockError;
use ventra_core::money::Money;
use ventra_inventory::{InventoryGateway, ProductInfo};

/// One remote call as observed by the double, in issue order. Failed calls
/// are recorded too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    /// `decrement(product_id, quantity)`.
    Decrement {
        /// Target product.
        product_id: String,
        /// Requested stock reduction.
        quantity: i64,
    },
    /// `adjust(product_id, delta)`.
    Adjust {
        /// Target product.
        product_id: String,
        /// Signed stock change (positive increases stock).
        delta: i64,
    },
    /// `fetch_product(product_id)`.
    FetchProduct {
        /// Target product.
        product_id: String,
    },
}

/// An inventory gateway that records all calls and returns scripted
/// outcomes.
///
/// By default every stock change succeeds and every product lookup fails
/// (unknown product). Products are registered with
/// [`with_product`](Self::with_product); failures are scripted per product
/// with [`fail_decrement_for`](Self::fail_decrement_for) and
/// [`fail_adjust_for`](Self::fail_adjust_for).
#[derive(Debug, Default)]
pub struct RecordingInventory {
    calls: Mutex<Vec<RemoteCall>>,
    products: HashMap<String, ProductInfo>,
    fail_decrement: HashSet<String>,
    fail_adjust: HashSet<String>,
}

impl RecordingInventory {
    /// Creates a double where every stock change succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product so `fetch_product` succeeds for it.
    #[must_use]
    pub fn with_product(mut self, product_id: &str, price_cents: i64, name: &str) -> Self {
        self.products.insert(
            product_id.to_owned(),
            ProductInfo {
                price: Money::from_cents(price_cents),
                name: name.to_owned(),
            },
        );
        self
    }

    /// Scripts `decrement` to fail with an insufficient-stock error for the
    /// given product.
    #[must_use]
    pub fn fail_decrement_for(mut self, product_id: &str) -> Self {
        self.fail_decrement.insert(product_id.to_owned());
        self
    }

    /// Scripts `adjust` to fail with an unavailable error for the given
    /// product.
    #[must_use]
    pub fn fail_adjust_for(mut self, product_id: &str) -> Self {
        self.fail_adjust.insert(product_id.to_owned());
        self
    }

    /// Snapshot of every remote call issued so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl InventoryGateway for RecordingInventory {
    async fn decrement(&self, product_id: &str, quantity: i64) -> Result<(), StockError> {
        self.record(RemoteCall::Decrement {
            product_id: product_id.to_owned(),
            quantity,
        });
        if self.fail_decrement.contains(product_id) {
            return Err(StockError::insufficient(product_id, "insufficient stock"));
        }
        Ok(())
    }

    async fn adjust(&self, product_id: &str, delta: i64) -> Result<(), StockError> {
        self.record(RemoteCall::Adjust {
            product_id: product_id.to_owned(),
            delta,
        });
        if self.fail_adjust.contains(product_id) {
            return Err(StockError::unavailable(product_id, "service unavailable"));
        }
        Ok(())
    }

    async fn fetch_product(&self, product_id: &str) -> Result<ProductInfo, StockError> {
        self.record(RemoteCall::FetchProduct {
            product_id: product_id.to_owned(),
        });
        self.products
            .get(product_id)
            .cloned()
            .ok_or_else(|| StockError::unavailable(product_id, "unknown product"))
    }
}
