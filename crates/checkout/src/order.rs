//! Order payload construction and the fallback confirmation id.

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;

use corner_market_core::{
    Address, OrderCustomer, OrderItem, OrderPayload, OrderPaymentMethod, PaymentMethod,
};

use crate::cart::CartLineItem;

/// Build the immutable order payload from a cart snapshot and the
/// selected address and payment method.
///
/// Everything is copied by value with a fresh `created_at`, so later
/// session mutations cannot affect a payload already in flight.
#[must_use]
pub fn build_order_payload(
    line_items: &[CartLineItem],
    total_price: Decimal,
    address: &Address,
    payment: &PaymentMethod,
) -> OrderPayload {
    let items = line_items
        .iter()
        .map(|item| OrderItem {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            price: item.product.price,
            quantity: item.quantity,
        })
        .collect();

    OrderPayload {
        items,
        total_price,
        customer: OrderCustomer {
            title: address.title.clone(),
            detail: address.detail.clone(),
            note: address.note.clone(),
        },
        payment_method: OrderPaymentMethod {
            id: payment.id.clone(),
            label: payment.label.clone(),
        },
        created_at: Utc::now(),
    }
}

/// A locally synthesized 6-digit numeric confirmation id, used when the
/// order service is unreachable or its response omits an id.
#[must_use]
pub fn fallback_order_id() -> String {
    let id: u32 = rand::rng().random_range(100_000..1_000_000);
    id.to_string()
}
