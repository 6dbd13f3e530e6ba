//! Sale access control.

use ventra_core::error::DomainError;
use ventra_core::identity::Requester;

use super::sale::Sale;

/// Owner-or-administrator rule: an Administrator may read or mutate any
/// sale; anyone else only a sale they own. Pure predicate, no side effects.
///
/// Existence must be checked before this — a requester probing someone
/// else's sale learns it exists, which matches the intended semantics of
/// forbidden-vs-not-found.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` when the requester has no rights over
/// the sale.
pub fn ensure_can_access(requester: &Requester, sale: &Sale) -> Result<(), DomainError> {
    if requester.is_administrator() || sale.seller_id == requester.user_id {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "not authorized to access this sale".to_owned(),
        ))
    }
}
