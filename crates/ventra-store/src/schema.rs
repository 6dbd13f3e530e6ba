//! Sales database schema.

/// SQL to create the sales table. Line items are stored as a JSONB document
/// because products are external references, not local rows.
pub const CREATE_SALES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS sales (
    id          UUID PRIMARY KEY,
    seller_id   UUID NOT NULL,
    line_items  JSONB NOT NULL,
    total_cents BIGINT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_sales_seller_id
    ON sales (seller_id, created_at DESC);

CREATE INDEX IF NOT EXISTS idx_sales_created_at
    ON sales (created_at DESC);
";
