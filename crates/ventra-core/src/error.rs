//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Classifies a remote stock failure by what the inventory service reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockErrorKind {
    /// The service rejected the change (e.g. insufficient stock).
    Insufficient,
    /// The service errored, timed out, or was unreachable.
    Unavailable,
}

/// A remote stock change was rejected or could not be performed.
///
/// Carries the upstream context so callers receive an actionable message
/// naming the product and what the inventory service said.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("stock operation failed for product {product_id}: {message}")]
pub struct StockError {
    /// The product the failed call targeted.
    pub product_id: String,
    /// Whether the service rejected the change or was unavailable.
    pub kind: StockErrorKind,
    /// Upstream status/message detail.
    pub message: String,
}

impl StockError {
    /// A rejection reported by the inventory service (insufficient stock).
    #[must_use]
    pub fn insufficient(product_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            kind: StockErrorKind::Insufficient,
            message: message.into(),
        }
    }

    /// A service failure: upstream 5xx, network error, or timeout.
    #[must_use]
    pub fn unavailable(product_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            kind: StockErrorKind::Unavailable,
            message: message.into(),
        }
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A sale was not found.
    #[error("sale not found: {0}")]
    NotFound(Uuid),

    /// The requester lacks rights over the target sale.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A validation error in domain logic or request input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The remote inventory service rejected or failed a stock change.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// The report rendering collaborator failed.
    #[error("render error: {0}")]
    Render(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
