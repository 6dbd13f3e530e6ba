//! Routes for the sales bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ventra_sales::application::commands::{
    handle_create_sale, handle_delete_sale, handle_update_sale,
};
use ventra_sales::application::queries::{handle_get_sale, handle_list_sales};
use ventra_sales::domain::normalize::RawLineItem;
use ventra_sales::domain::sale::Sale;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing a sale's line items. Accepts the
/// field names both the current clients and the legacy ones send.
#[derive(Debug, Deserialize)]
pub struct SaleItemsRequest {
    /// Line items in whatever shape the client sent them.
    #[serde(alias = "lineItems", alias = "items", alias = "productos")]
    pub line_items: Vec<RawLineItem>,
}

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always `true`.
    pub deleted: bool,
    /// Id of the deleted sale.
    pub id: Uuid,
}

/// POST /api/v1/sales
#[tracing::instrument(skip(state, body))]
async fn create_sale(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Json(body): Json<SaleItemsRequest>,
) -> Result<(StatusCode, Json<Sale>), ApiError> {
    let sale = handle_create_sale(
        &requester,
        &body.line_items,
        state.clock.as_ref(),
        state.inventory.as_ref(),
        state.sales.as_ref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// GET /api/v1/sales
#[tracing::instrument(skip(state))]
async fn list_sales(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
) -> Result<Json<Vec<Sale>>, ApiError> {
    let sales = handle_list_sales(&requester, state.sales.as_ref()).await?;
    Ok(Json(sales))
}

/// GET /api/v1/sales/{id}
#[tracing::instrument(skip(state))]
async fn get_sale(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Sale>, ApiError> {
    let sale = handle_get_sale(&requester, id, state.sales.as_ref()).await?;
    Ok(Json(sale))
}

/// PUT /api/v1/sales/{id}
#[tracing::instrument(skip(state, body))]
async fn update_sale(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<SaleItemsRequest>,
) -> Result<Json<Sale>, ApiError> {
    let sale = handle_update_sale(
        &requester,
        id,
        &body.line_items,
        state.inventory.as_ref(),
        state.sales.as_ref(),
    )
    .await?;
    Ok(Json(sale))
}

/// DELETE /api/v1/sales/{id}
#[tracing::instrument(skip(state))]
async fn delete_sale(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    handle_delete_sale(&requester, id, state.inventory.as_ref(), state.sales.as_ref()).await?;
    Ok(Json(DeleteResponse { deleted: true, id }))
}

/// Returns the router for the sales context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route(
            "/{id}",
            get(get_sale).put(update_sale).delete(delete_sale),
        )
}
