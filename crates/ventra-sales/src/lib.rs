//! Ventra — Sales bounded context.
//!
//! Owns the sale aggregate and everything required to keep the remote
//! inventory service consistent with it: line-item normalization, the stock
//! reconciliation saga, price fill, and the owner-or-administrator access
//! rule.

pub mod application;
pub mod domain;

#[cfg(test)]
pub(crate) mod testing;
