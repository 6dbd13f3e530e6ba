//! The sale aggregate and its line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ventra_core::clock::Clock;
use ventra_core::money::Money;

/// One product entry within a sale.
///
/// `product_id` is an external reference into the inventory service; the
/// product's source of truth lives outside this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// External product reference.
    pub product_id: String,
    /// Units sold. Always strictly positive once persisted.
    pub quantity: i64,
    /// Cached unit price in cents. Zero until filled from the inventory
    /// service.
    pub unit_price: Money,
    /// Display label fetched alongside the price. Empty when the price
    /// fetch soft-failed.
    #[serde(default)]
    pub product_name: String,
}

impl LineItem {
    /// Line total: `quantity × unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// The sale aggregate.
///
/// `total` is derived, never set by a caller: it is recomputed from the
/// current line items on every save so it is never stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Identity assigned at creation, immutable.
    pub id: Uuid,
    /// Owning seller, immutable after creation.
    pub seller_id: Uuid,
    /// Ordered line items. Mutated only through the reconciliation update
    /// path.
    pub line_items: Vec<LineItem>,
    /// Σ(quantity × unit_price) over `line_items` at the moment of last
    /// save.
    pub total: Money,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Creates a new sale with a fresh id, stamping `created_at` from the
    /// clock and computing the total from `line_items`.
    #[must_use]
    pub fn new(seller_id: Uuid, line_items: Vec<LineItem>, clock: &dyn Clock) -> Self {
        let total = total_of(&line_items);
        Self {
            id: Uuid::new_v4(),
            seller_id,
            line_items,
            total,
            created_at: clock.now(),
        }
    }

    /// Replaces the line items and recomputes the total. Callers must only
    /// invoke this after the stock diff has been fully applied remotely.
    pub fn replace_line_items(&mut self, line_items: Vec<LineItem>) {
        self.line_items = line_items;
        self.total = total_of(&self.line_items);
    }
}

/// Exact sum of line totals. A line item whose price fill failed carries a
/// zero price and so contributes zero.
#[must_use]
pub fn total_of(line_items: &[LineItem]) -> Money {
    line_items.iter().map(LineItem::line_total).sum()
}
