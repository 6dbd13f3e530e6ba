//! Shared application state.

use std::sync::Arc;

use ventra_core::clock::Clock;
use ventra_inventory::InventoryGateway;
use ventra_reports::ReportRenderer;
use ventra_sales::domain::repository::SaleRepository;

use crate::auth::AuthConfig;

/// Application state shared across all request handlers. Every collaborator
/// sits behind a trait object so tests can substitute doubles.
#[derive(Clone)]
pub struct AppState {
    /// Sale persistence.
    pub sales: Arc<dyn SaleRepository>,
    /// Remote inventory service client.
    pub inventory: Arc<dyn InventoryGateway>,
    /// Report rendering collaborator.
    pub renderer: Arc<dyn ReportRenderer>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Token verification settings.
    pub auth: AuthConfig,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        sales: Arc<dyn SaleRepository>,
        inventory: Arc<dyn InventoryGateway>,
        renderer: Arc<dyn ReportRenderer>,
        clock: Arc<dyn Clock>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            sales,
            inventory,
            renderer,
            clock,
            auth,
        }
    }
}
