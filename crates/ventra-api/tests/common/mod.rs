//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tower::ServiceExt;
use uuid::Uuid;

use ventra_api::auth::{AuthConfig, Claims};
use ventra_api::state::AppState;
use ventra_core::error::DomainError;
use ventra_core::identity::Role;
use ventra_reports::{HtmlReportRenderer, ReportRenderer};
use ventra_sales::domain::repository::SaleRepository;
use ventra_sales::domain::sale::Sale;
use ventra_test_support::{FixedClock, RecordingInventory};

/// Shared secret used to sign and verify test tokens.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Fixed timestamp used across all integration tests.
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 10, 0, 0).unwrap()
}

/// Signs a bearer token for the given user.
pub fn token_for(user_id: Uuid, name: &str, role: Role) -> String {
    let claims = Claims {
        sub: user_id,
        name: name.to_owned(),
        role: role.as_str().to_owned(),
        exp: usize::try_from(Utc::now().timestamp()).unwrap() + 3600,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Signs a token whose expiry is long past.
pub fn expired_token_for(user_id: Uuid, name: &str, role: Role) -> String {
    let claims = Claims {
        sub: user_id,
        name: name.to_owned(),
        role: role.as_str().to_owned(),
        exp: 1,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// A `SaleRepository` backed by a hash map, shared with the app via `Arc` so
/// tests can assert on persisted state directly.
#[derive(Debug, Default)]
pub struct InMemorySaleRepository {
    sales: Mutex<HashMap<Uuid, Sale>>,
}

impl InMemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct lookup without access checks, for assertions.
    pub fn get(&self, sale_id: Uuid) -> Option<Sale> {
        self.sales.lock().unwrap().get(&sale_id).cloned()
    }

    /// Snapshot of every stored sale, unordered.
    pub fn all(&self) -> Vec<Sale> {
        self.sales.lock().unwrap().values().cloned().collect()
    }

    /// Inserts a sale directly, bypassing the API.
    pub fn seed(&self, sale: Sale) {
        self.sales.lock().unwrap().insert(sale.id, sale);
    }
}

fn newest_first(mut sales: Vec<Sale>) -> Vec<Sale> {
    sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sales
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn insert(&self, sale: &Sale) -> Result<(), DomainError> {
        self.sales.lock().unwrap().insert(sale.id, sale.clone());
        Ok(())
    }

    async fn update(&self, sale: &Sale) -> Result<(), DomainError> {
        self.sales.lock().unwrap().insert(sale.id, sale.clone());
        Ok(())
    }

    async fn delete(&self, sale_id: Uuid) -> Result<(), DomainError> {
        self.sales.lock().unwrap().remove(&sale_id);
        Ok(())
    }

    async fn find_by_id(&self, sale_id: Uuid) -> Result<Option<Sale>, DomainError> {
        Ok(self.get(sale_id))
    }

    async fn find_all(&self) -> Result<Vec<Sale>, DomainError> {
        Ok(newest_first(self.all()))
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Sale>, DomainError> {
        let sales = self
            .all()
            .into_iter()
            .filter(|sale| sale.seller_id == seller_id)
            .collect();
        Ok(newest_first(sales))
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        seller_id: Option<Uuid>,
    ) -> Result<Vec<Sale>, DomainError> {
        let sales = self
            .all()
            .into_iter()
            .filter(|sale| sale.created_at >= start && sale.created_at <= end)
            .filter(|sale| seller_id.is_none_or(|id| sale.seller_id == id))
            .collect();
        Ok(newest_first(sales))
    }
}

/// Build the full app router over in-memory doubles. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(
    sales: Arc<InMemorySaleRepository>,
    inventory: Arc<RecordingInventory>,
) -> Router {
    build_test_app_with_renderer(sales, inventory, Arc::new(HtmlReportRenderer))
}

/// Build the full app router with a custom renderer for tests that exercise
/// the document output path.
pub fn build_test_app_with_renderer(
    sales: Arc<InMemorySaleRepository>,
    inventory: Arc<RecordingInventory>,
    renderer: Arc<dyn ReportRenderer>,
) -> Router {
    let app_state = AppState::new(
        sales,
        inventory,
        renderer,
        Arc::new(FixedClock(fixed_instant())),
        AuthConfig::from_secret(TEST_SECRET),
    );
    ventra_api::app(app_state)
}

/// Send a request with a bearer token and an optional JSON body; return the
/// status and the parsed JSON response.
pub async fn request_json(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let (status, bytes) = request_raw(app, method, uri, token, body).await;
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// Send a request and return the status and raw body bytes.
pub async fn request_raw(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, body_bytes.to_vec())
}
