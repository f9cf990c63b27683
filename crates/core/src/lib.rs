//! Corner Market Core - Shared domain types.
//!
//! This crate provides the common types used across all Corner Market
//! components:
//! - `checkout` - Cart/checkout orchestration engine
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Records
//! are produced by the checkout crate's catalog normalizer and are
//! immutable once loaded into a session.
//!
//! # Modules
//!
//! - [`types`] - Products, categories, addresses, payment methods, and
//!   order payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
