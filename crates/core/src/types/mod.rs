//! Core types for Corner Market.
//!
//! Canonical records for the catalog and checkout domain.

pub mod address;
pub mod category;
pub mod order;
pub mod payment;
pub mod product;

pub use address::Address;
pub use category::{CAMPAIGN_CATEGORY_ID, CAMPAIGN_CATEGORY_NAME, Category};
pub use order::{OrderConfirmation, OrderCustomer, OrderItem, OrderPayload, OrderPaymentMethod};
pub use payment::PaymentMethod;
pub use product::Product;
