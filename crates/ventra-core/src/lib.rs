//! Ventra Core — shared domain abstractions.
//!
//! This crate defines the fundamental types that all other crates depend on.
//! It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod identity;
pub mod money;
