//! Ventra — `PostgreSQL` persistence for sales.

pub mod pg_sale_repository;
pub mod schema;

pub use pg_sale_repository::PgSaleRepository;
