//! Order payload and confirmation types.
//!
//! The payload is constructed exactly once per submission attempt and
//! never mutated afterwards. Serialization matches the backend wire
//! shape (camelCase keys); decimal amounts serialize as strings to
//! preserve precision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line in the order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Delivery details, copied by value from the selected address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payment selection, copied by value from the selected method.
///
/// Only the id and display label travel over the wire; the masked
/// description stays local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPaymentMethod {
    pub id: String,
    pub label: String,
}

/// The immutable order submission payload.
///
/// A snapshot of cart, address, and payment state at the moment of
/// submission; later session mutations cannot affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub items: Vec<OrderItem>,
    pub total_price: Decimal,
    pub customer: OrderCustomer,
    pub payment_method: OrderPaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// The terminal confirmation emitted by the order submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Server-assigned order id, or a locally synthesized 6-digit id
    /// when the server omitted one or was unreachable.
    pub order_id: String,
    /// Whether the order service acknowledged the submission. `false`
    /// marks a demo-mode fallback confirmation.
    pub recorded: bool,
}
