//! Routes for the reporting bounded context.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use ventra_core::error::DomainError;
use ventra_reports::{ReportRange, handle_sales_report};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the sales report.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Start of the window. RFC 3339 or `YYYY-MM-DD`.
    #[serde(alias = "startDate", alias = "start_date")]
    pub start: String,
    /// End of the window, inclusive. RFC 3339 or `YYYY-MM-DD`.
    #[serde(alias = "endDate", alias = "end_date")]
    pub end: String,
    /// Output format: `json` (default) or `document`.
    pub format: Option<String>,
}

/// Parses a report bound as RFC 3339 or, for bare dates, as the given
/// time-of-day so that `YYYY-MM-DD` bounds cover the whole day.
fn parse_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DomainError::Validation(format!("invalid date: {raw}")))?;
    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    time.map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::Validation(format!("invalid date: {raw}")))
}

/// GET /api/v1/reports/sales
#[tracing::instrument(skip(state))]
async fn sales_report(
    State(state): State<AppState>,
    AuthUser(requester): AuthUser,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let start = parse_bound(&query.start, false)?;
    let end = parse_bound(&query.end, true)?;
    let range = ReportRange::new(start, end)?;

    let report = handle_sales_report(&requester, range, state.sales.as_ref()).await?;

    match query.format.as_deref() {
        None | Some("json") => Ok(Json(report).into_response()),
        Some("document") => {
            let bytes = state.renderer.render(&report, &requester, &range).await?;
            let headers = [(header::CONTENT_TYPE, state.renderer.content_type())];
            Ok((headers, bytes).into_response())
        }
        Some(other) => Err(ApiError(DomainError::Validation(format!(
            "unknown report format: {other}"
        )))),
    }
}

/// Returns the router for the reports context.
pub fn router() -> Router<AppState> {
    Router::new().route("/sales", get(sales_report))
}
