//! Corner Market checkout engine.
//!
//! This crate implements the cart/checkout orchestration core of the
//! storefront as a library, allowing it to be driven by any UI shell:
//!
//! - [`catalog`] - REST client for the catalog service plus the
//!   tolerant response normalizer
//! - [`cart`] - in-memory cart with derived line items and totals
//! - [`registry`] - saved address/payment collections with a selection
//!   pointer
//! - [`session`] - the checkout state machine (screen enum plus guarded
//!   transitions)
//! - [`order`] - order payload construction and the fallback
//!   confirmation id
//! - [`config`] - environment-based configuration
//!
//! # Failure model
//!
//! User-visible failures are uniformly soft. Catalog fetch problems
//! degrade to a built-in fallback catalog, guard violations are
//! rejected actions rather than errors, and a failed order submission
//! still produces a local confirmation so the flow always reaches the
//! success screen once a submission is attempted.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod order;
pub mod registry;
pub mod session;

pub use cart::{CartLineItem, CartStore};
pub use catalog::{CatalogClient, CatalogError};
pub use config::{CatalogConfig, ConfigError};
pub use registry::{Keyed, Registry};
pub use session::{AddressForm, CardForm, CheckoutSession, FormError, Rejection, Screen};
