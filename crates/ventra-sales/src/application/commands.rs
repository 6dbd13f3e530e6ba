//! Sale mutation handlers: create, update, delete.

use std::collections::BTreeMap;

use uuid::Uuid;

use ventra_core::clock::Clock;
use ventra_core::error::DomainError;
use ventra_core::identity::Requester;
use ventra_core::money::Money;
use ventra_inventory::InventoryGateway;

use crate::domain::access::ensure_can_access;
use crate::domain::normalize::{NormalizedItem, RawLineItem, normalize};
use crate::domain::reconcile;
use crate::domain::repository::SaleRepository;
use crate::domain::sale::{LineItem, Sale};

/// Creates a sale owned by the requester.
///
/// Stock for every line is reserved with the inventory service before
/// anything is persisted; if any decrement fails, already-applied ones are
/// compensated and the sale is never saved.
///
/// # Errors
///
/// Returns `Validation` for malformed line items, `Stock` when the
/// inventory service rejects or fails a reservation, and `Infrastructure`
/// on persistence failure.
pub async fn handle_create_sale(
    requester: &Requester,
    raw_items: &[RawLineItem],
    clock: &dyn Clock,
    inventory: &dyn InventoryGateway,
    repo: &dyn SaleRepository,
) -> Result<Sale, DomainError> {
    let items = normalize(raw_items)?;

    let new_quantities = quantities_of(&items);
    let deltas = reconcile::deltas_between(&BTreeMap::new(), &new_quantities);
    reconcile::apply(inventory, &deltas).await?;

    let line_items = fill_prices(items, inventory).await;
    let sale = Sale::new(requester.user_id, line_items, clock);
    repo.insert(&sale).await?;

    tracing::info!(sale_id = %sale.id, seller_id = %sale.seller_id, total = %sale.total, "sale created");
    Ok(sale)
}

/// Replaces a sale's line items, reconciling the stock diff first.
///
/// Only the diff against the current items is sent to the inventory
/// service: products needing more stock are decremented, surplus is
/// returned. The sale's line items are replaced and its total recomputed
/// only after the whole diff succeeds.
///
/// # Errors
///
/// Returns `NotFound` when the sale does not exist, `Forbidden` when the
/// requester does not own it (and is not an Administrator), `Validation`
/// for malformed input, and `Stock` on reconciliation failure.
pub async fn handle_update_sale(
    requester: &Requester,
    sale_id: Uuid,
    raw_items: &[RawLineItem],
    inventory: &dyn InventoryGateway,
    repo: &dyn SaleRepository,
) -> Result<Sale, DomainError> {
    let mut sale = repo
        .find_by_id(sale_id)
        .await?
        .ok_or(DomainError::NotFound(sale_id))?;
    ensure_can_access(requester, &sale)?;

    let items = normalize(raw_items)?;

    let old_quantities = reconcile::quantities(
        sale.line_items
            .iter()
            .map(|item| (item.product_id.as_str(), item.quantity)),
    );
    let new_quantities = quantities_of(&items);
    let deltas = reconcile::deltas_between(&old_quantities, &new_quantities);
    reconcile::apply(inventory, &deltas).await?;

    let line_items = fill_prices(items, inventory).await;
    sale.replace_line_items(line_items);
    repo.update(&sale).await?;

    tracing::info!(sale_id = %sale.id, total = %sale.total, "sale updated");
    Ok(sale)
}

/// Deletes a sale after returning all of its stock.
///
/// Every line item's quantity is returned to the inventory service; if any
/// return fails, already-returned stock is re-decremented and the sale is
/// left un-deleted.
///
/// # Errors
///
/// Returns `NotFound`, `Forbidden`, or `Stock` analogous to
/// [`handle_update_sale`].
pub async fn handle_delete_sale(
    requester: &Requester,
    sale_id: Uuid,
    inventory: &dyn InventoryGateway,
    repo: &dyn SaleRepository,
) -> Result<(), DomainError> {
    let sale = repo
        .find_by_id(sale_id)
        .await?
        .ok_or(DomainError::NotFound(sale_id))?;
    ensure_can_access(requester, &sale)?;

    let current = reconcile::quantities(
        sale.line_items
            .iter()
            .map(|item| (item.product_id.as_str(), item.quantity)),
    );
    let deltas = reconcile::deltas_between(&current, &BTreeMap::new());
    reconcile::apply(inventory, &deltas).await?;

    repo.delete(sale_id).await?;

    tracing::info!(sale_id = %sale_id, "sale deleted");
    Ok(())
}

fn quantities_of(items: &[NormalizedItem]) -> BTreeMap<String, i64> {
    reconcile::quantities(
        items
            .iter()
            .map(|item| (item.product_id.as_str(), item.quantity)),
    )
}

/// Builds line items, fetching price and display name from the inventory
/// service for any line the caller did not price.
///
/// Price fetches are read-only and deliberately soft-fail: a line whose
/// lookup fails carries a zero price (contributing zero to the total) and
/// the save proceeds. This is the opposite of the hard-fail stock
/// reconciliation and must stay that way.
async fn fill_prices(items: Vec<NormalizedItem>, inventory: &dyn InventoryGateway) -> Vec<LineItem> {
    let mut line_items = Vec::with_capacity(items.len());
    for item in items {
        let (unit_price, product_name) = match item.unit_price {
            Some(price) => (price, String::new()),
            None => match inventory.fetch_product(&item.product_id).await {
                Ok(info) => (info.price, info.name),
                Err(err) => {
                    tracing::warn!(
                        product_id = %item.product_id,
                        error = %err,
                        "price fetch failed; line contributes zero to total"
                    );
                    (Money::zero(), String::new())
                }
            },
        };
        line_items.push(LineItem {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price,
            product_name,
        });
    }
    line_items
}
