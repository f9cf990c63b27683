//! Saved payment method.

use serde::{Deserialize, Serialize};

/// A payment method saved during the session.
///
/// The `description` only ever carries a masked card rendering
/// (`**** **** **** 1234`); the raw card number is never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    /// Display label, e.g. the cardholder name.
    pub label: String,
    /// Masked description shown on the payment and summary screens.
    pub description: String,
}
