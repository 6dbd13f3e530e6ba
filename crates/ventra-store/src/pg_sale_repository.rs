//! `PostgreSQL` implementation of the `SaleRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use ventra_core::error::DomainError;
use ventra_core::money::Money;
use ventra_sales::domain::repository::SaleRepository;
use ventra_sales::domain::sale::{LineItem, Sale};

use crate::schema::CREATE_SALES_TABLE;

const SELECT_COLUMNS: &str = "id, seller_id, line_items, total_cents, created_at";

/// PostgreSQL-backed sale repository.
#[derive(Debug, Clone)]
pub struct PgSaleRepository {
    pool: PgPool,
}

impl PgSaleRepository {
    /// Creates a new `PgSaleRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the sales table and indexes if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on database failure.
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::raw_sql(CREATE_SALES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }
}

fn infra(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

/// Builds a `Sale` from its stored columns.
fn sale_from_parts(
    id: Uuid,
    seller_id: Uuid,
    line_items: serde_json::Value,
    total_cents: i64,
    created_at: DateTime<Utc>,
) -> Result<Sale, DomainError> {
    let line_items: Vec<LineItem> = serde_json::from_value(line_items).map_err(|err| {
        DomainError::Infrastructure(format!("line item deserialization failed: {err}"))
    })?;
    Ok(Sale {
        id,
        seller_id,
        line_items,
        total: Money::from_cents(total_cents),
        created_at,
    })
}

fn map_row(row: &PgRow) -> Result<Sale, DomainError> {
    sale_from_parts(
        row.try_get("id").map_err(infra)?,
        row.try_get("seller_id").map_err(infra)?,
        row.try_get("line_items").map_err(infra)?,
        row.try_get("total_cents").map_err(infra)?,
        row.try_get("created_at").map_err(infra)?,
    )
}

fn line_items_json(sale: &Sale) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(&sale.line_items).map_err(|err| {
        DomainError::Infrastructure(format!("line item serialization failed: {err}"))
    })
}

#[async_trait]
impl SaleRepository for PgSaleRepository {
    async fn insert(&self, sale: &Sale) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO sales (id, seller_id, line_items, total_cents, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(sale.id)
        .bind(sale.seller_id)
        .bind(line_items_json(sale)?)
        .bind(sale.total.cents())
        .bind(sale.created_at)
        .execute(&self.pool)
        .await
        .map_err(infra)?;
        Ok(())
    }

    async fn update(&self, sale: &Sale) -> Result<(), DomainError> {
        sqlx::query("UPDATE sales SET line_items = $2, total_cents = $3 WHERE id = $1")
            .bind(sale.id)
            .bind(line_items_json(sale)?)
            .bind(sale.total.cents())
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn delete(&self, sale_id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(sale_id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        Ok(())
    }

    async fn find_by_id(&self, sale_id: Uuid) -> Result<Option<Sale>, DomainError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM sales WHERE id = $1"))
            .bind(sale_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infra)?;
        row.as_ref().map(map_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Sale>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM sales ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter().map(map_row).collect()
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> Result<Vec<Sale>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM sales WHERE seller_id = $1 ORDER BY created_at DESC"
        ))
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter().map(map_row).collect()
    }

    async fn find_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        seller_id: Option<Uuid>,
    ) -> Result<Vec<Sale>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM sales \
             WHERE created_at >= $1 AND created_at <= $2 \
             AND ($3::uuid IS NULL OR seller_id = $3) \
             ORDER BY created_at DESC"
        ))
        .bind(start)
        .bind(end)
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        rows.iter().map(map_row).collect()
    }
}
