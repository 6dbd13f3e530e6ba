//! Sale read handlers: get one, list.

use uuid::Uuid;

use ventra_core::error::DomainError;
use ventra_core::identity::Requester;

use crate::domain::access::ensure_can_access;
use crate::domain::repository::SaleRepository;
use crate::domain::sale::Sale;

/// Loads one sale. Existence is checked before authorization, so a
/// requester probing a missing id gets `NotFound`, and one probing someone
/// else's sale gets `Forbidden`.
///
/// # Errors
///
/// Returns `NotFound`, `Forbidden`, or `Infrastructure`.
pub async fn handle_get_sale(
    requester: &Requester,
    sale_id: Uuid,
    repo: &dyn SaleRepository,
) -> Result<Sale, DomainError> {
    let sale = repo
        .find_by_id(sale_id)
        .await?
        .ok_or(DomainError::NotFound(sale_id))?;
    ensure_can_access(requester, &sale)?;
    Ok(sale)
}

/// Lists sales visible to the requester: all of them for an Administrator,
/// otherwise only the requester's own.
///
/// # Errors
///
/// Returns `Infrastructure` on persistence failure.
pub async fn handle_list_sales(
    requester: &Requester,
    repo: &dyn SaleRepository,
) -> Result<Vec<Sale>, DomainError> {
    if requester.is_administrator() {
        repo.find_all().await
    } else {
        repo.find_by_seller(requester.user_id).await
    }
}
