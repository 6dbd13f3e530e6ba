//! Domain model for the Sales context.

pub mod access;
pub mod normalize;
pub mod reconcile;
pub mod repository;
pub mod sale;
