//! Stock reconciliation saga.
//!
//! A sale mutation must move the remote inventory service from the stock
//! view of the old line-item set to that of the new one. There is no shared
//! transaction with the remote side, so the engine runs a compensating
//! sequence: compute the minimal stock deltas, apply them one call at a
//! time, and on the first failure unwind the already-applied steps in
//! reverse by issuing each step's inverse.
//!
//! Compensations are best-effort. A call that timed out may still have been
//! applied remotely (no idempotency key is in play), so a compensation can
//! double-adjust. That consistency window is a documented property of the
//! protocol, not something this engine can close.

use std::collections::BTreeMap;

use ventra_core::error::DomainError;
use ventra_inventory::InventoryGateway;

/// A signed stock change for one product. Positive means "reduce remote
/// stock by this amount"; negative means "return this amount".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDelta {
    /// Target product.
    pub product_id: String,
    /// Signed quantity.
    pub quantity: i64,
}

/// Aggregates `(product_id, quantity)` pairs into a multiset keyed by
/// product id. Duplicate product lines within one sale are summed, not kept
/// separate.
pub fn quantities<'a, I>(pairs: I) -> BTreeMap<String, i64>
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut totals = BTreeMap::new();
    for (product_id, quantity) in pairs {
        *totals.entry(product_id.to_owned()).or_insert(0) += quantity;
    }
    totals
}

/// Computes the minimal delta set moving remote stock from `old` to `new`,
/// over the union of product ids. Products whose quantity is unchanged
/// produce no delta. Deltas come out in ascending product-id order, so one
/// reconciliation run is deterministic.
#[must_use]
pub fn deltas_between(old: &BTreeMap<String, i64>, new: &BTreeMap<String, i64>) -> Vec<StockDelta> {
    let mut union: BTreeMap<&str, i64> = BTreeMap::new();
    for (product_id, quantity) in new {
        *union.entry(product_id).or_insert(0) += quantity;
    }
    for (product_id, quantity) in old {
        *union.entry(product_id).or_insert(0) -= quantity;
    }

    union
        .into_iter()
        .filter(|(_, quantity)| *quantity != 0)
        .map(|(product_id, quantity)| StockDelta {
            product_id: product_id.to_owned(),
            quantity,
        })
        .collect()
}

/// Issues one delta against the gateway: a positive delta reserves stock
/// via `decrement`, a negative one returns it via `adjust`.
async fn execute(
    gateway: &dyn InventoryGateway,
    delta: &StockDelta,
) -> Result<(), ventra_core::error::StockError> {
    if delta.quantity > 0 {
        gateway.decrement(&delta.product_id, delta.quantity).await
    } else {
        gateway.adjust(&delta.product_id, -delta.quantity).await
    }
}

/// Applies deltas sequentially, unwinding on the first failure.
///
/// Remote calls are never issued in parallel: the compensation list depends
/// on knowing exactly which earlier calls succeeded. On failure, every
/// already-applied delta is inverted in reverse order. Compensation errors
/// are logged with full call context but never mask the original failure —
/// the triggering `StockError` is what the caller sees.
///
/// # Errors
///
/// Returns `DomainError::Stock` carrying the first failed call's upstream
/// status and message.
pub async fn apply(gateway: &dyn InventoryGateway, deltas: &[StockDelta]) -> Result<(), DomainError> {
    let mut applied: Vec<&StockDelta> = Vec::new();

    for delta in deltas {
        match execute(gateway, delta).await {
            Ok(()) => applied.push(delta),
            Err(original) => {
                tracing::warn!(
                    product_id = %delta.product_id,
                    quantity = delta.quantity,
                    error = %original,
                    applied_steps = applied.len(),
                    "stock delta failed, unwinding applied steps"
                );
                unwind(gateway, &applied).await;
                return Err(DomainError::Stock(original));
            }
        }
    }

    Ok(())
}

/// Inverts already-applied deltas in reverse order. Best-effort: failures
/// are logged and swallowed so the original error stays primary.
async fn unwind(gateway: &dyn InventoryGateway, applied: &[&StockDelta]) {
    for step in applied.iter().rev() {
        let inverse = StockDelta {
            product_id: step.product_id.clone(),
            quantity: -step.quantity,
        };
        if let Err(err) = execute(gateway, &inverse).await {
            tracing::error!(
                product_id = %inverse.product_id,
                quantity = inverse.quantity,
                error = %err,
                "compensation failed; remote stock may be inconsistent until audited"
            );
        }
    }
}
