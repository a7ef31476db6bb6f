//! Forgotten Essentials Core - Shared domain types.
//!
//! This crate provides the types shared by the storefront library and its
//! integration tests:
//! - products, categories and their vintage-specific attributes
//! - prices with decimal arithmetic
//! - the local cart line set
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no async runtime. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, emails, products and cart lines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
