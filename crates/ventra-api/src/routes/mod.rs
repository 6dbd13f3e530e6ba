//! Route modules organized by bounded context.

pub mod health;
pub mod reports;
pub mod sales;
