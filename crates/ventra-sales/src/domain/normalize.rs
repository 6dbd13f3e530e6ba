//! Line-item input normalization.
//!
//! Clients submit sale lines in several historical shapes: camelCase, snake
//! case, the legacy Spanish field names, ids as strings or numbers. Input is
//! modeled as a sum type over the known shapes and collapsed into canonical
//! `{product_id, quantity}` pairs. Validation is all-or-nothing: one bad
//! record rejects the whole batch.

use serde::Deserialize;
use serde_json::Value;

use ventra_core::error::DomainError;
use ventra_core::money::Money;

/// A loosely-typed scalar as it appears in request JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// String form, e.g. `"P1"` or `"3"`.
    Text(String),
    /// Integer form.
    Int(i64),
    /// Floating-point form (JSON has one number type).
    Float(f64),
    /// Anything else; always rejected with a named constraint.
    Other(Value),
}

/// One sale line as submitted, before normalization. Every accepted key
/// spelling maps onto the same field.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLineItem {
    /// Product reference: `product_id`, `productId`, `producto_id`, or `id`.
    #[serde(default, alias = "productId", alias = "producto_id", alias = "id")]
    pub product_id: Option<RawField>,
    /// Quantity: `quantity`, `qty`, or `cantidad`. Defaults to 1.
    #[serde(default, alias = "qty", alias = "cantidad")]
    pub quantity: Option<RawField>,
    /// Optional unit price: `unit_price`, `unitPrice`, `precio_unitario`, or
    /// `price`. Absent or zero means the price is fetched from the
    /// inventory service before saving.
    #[serde(
        default,
        alias = "unitPrice",
        alias = "precio_unitario",
        alias = "price"
    )]
    pub unit_price: Option<f64>,
}

/// Canonical form of one sale line.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    /// Non-empty product reference.
    pub product_id: String,
    /// Strictly positive quantity.
    pub quantity: i64,
    /// Price supplied by the caller, if any.
    pub unit_price: Option<Money>,
}

/// Collapses raw records into canonical items, rejecting the entire batch on
/// the first record that cannot yield a non-empty product id and a positive
/// integer quantity.
///
/// # Errors
///
/// Returns `DomainError::Validation` naming the offending line and
/// constraint.
pub fn normalize(raw: &[RawLineItem]) -> Result<Vec<NormalizedItem>, DomainError> {
    if raw.is_empty() {
        return Err(DomainError::Validation(
            "at least one line item is required".to_owned(),
        ));
    }

    raw.iter()
        .enumerate()
        .map(|(index, record)| normalize_one(index, record))
        .collect()
}

fn normalize_one(index: usize, record: &RawLineItem) -> Result<NormalizedItem, DomainError> {
    let product_id = match &record.product_id {
        Some(field) => coerce_product_id(field).ok_or_else(|| {
            DomainError::Validation(format!("line item {index}: product id is not resolvable"))
        })?,
        None => {
            return Err(DomainError::Validation(format!(
                "line item {index}: missing product id"
            )));
        }
    };

    let quantity = match &record.quantity {
        Some(field) => coerce_quantity(field).ok_or_else(|| {
            DomainError::Validation(format!("line item {index}: quantity is not numeric"))
        })?,
        None => 1,
    };
    if quantity <= 0 {
        return Err(DomainError::Validation(format!(
            "line item {index}: quantity must be positive"
        )));
    }

    let unit_price = match record.unit_price {
        Some(price) if price < 0.0 => {
            return Err(DomainError::Validation(format!(
                "line item {index}: unit price must not be negative"
            )));
        }
        Some(price) if price > 0.0 => Some(Money::from_decimal(price)),
        _ => None,
    };

    Ok(NormalizedItem {
        product_id,
        quantity,
        unit_price,
    })
}

/// String coercion of whichever id form is present. Empty and fractional
/// ids are unresolvable.
fn coerce_product_id(field: &RawField) -> Option<String> {
    match field {
        RawField::Text(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        RawField::Int(number) => Some(number.to_string()),
        #[allow(clippy::cast_possible_truncation)]
        RawField::Float(number) if number.fract() == 0.0 => Some((*number as i64).to_string()),
        _ => None,
    }
}

/// Integer coercion of the quantity. Numeric strings are accepted; anything
/// non-numeric or fractional is not.
fn coerce_quantity(field: &RawField) -> Option<i64> {
    match field {
        RawField::Int(number) => Some(*number),
        #[allow(clippy::cast_possible_truncation)]
        RawField::Float(number) if number.fract() == 0.0 => Some(*number as i64),
        RawField::Text(text) => text.trim().parse().ok(),
        _ => None,
    }
}
