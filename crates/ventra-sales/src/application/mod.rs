//! Application-level handlers for the Sales context.
//!
//! Each handler runs one logically sequential operation: check access,
//! normalize input, reconcile remote stock, then touch local state. Local
//! persistence only happens after every remote stock change has been
//! confirmed.

pub mod commands;
pub mod queries;
