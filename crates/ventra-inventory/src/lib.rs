//! Ventra — client for the remote product/inventory service.
//!
//! Product stock and prices live in a separate service reached over HTTP.
//! This crate defines the [`InventoryGateway`] trait the rest of the system
//! programs against, and the reqwest-backed [`HttpInventoryClient`] used in
//! production.

pub mod config;
pub mod gateway;
pub mod http;

pub use config::InventoryConfig;
pub use gateway::{InventoryGateway, ProductInfo};
pub use http::HttpInventoryClient;
