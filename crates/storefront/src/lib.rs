//! Forgotten Essentials storefront library.
//!
//! The in-process core behind the storefront views: catalog and content
//! reads (from Shopify or a built-in preview catalog), relevance search,
//! a local-first cart mirrored to Shopify in the background, and mock
//! accounts and saved items.
//!
//! # Architecture
//!
//! - [`state::StorefrontContext`] is built once at startup and hands out
//!   per-session objects ([`cart::CartSession`], [`auth::AuthSession`],
//!   [`search::SearchDebouncer`], [`wishlist::Wishlist`])
//! - [`catalog::Catalog`] is selected once from configuration; callers read
//!   through [`catalog::CatalogSource`] and never check credentials
//! - Failures degrade to empty or built-in data and are logged with
//!   `tracing`; server-class errors are reported to Sentry
//!
//! # Example
//!
//! ```rust,ignore
//! use forgotten_essentials_storefront::StorefrontContext;
//! use forgotten_essentials_storefront::catalog::CatalogSource;
//!
//! let ctx = StorefrontContext::from_env()?;
//! let _sentry = forgotten_essentials_storefront::telemetry::init(ctx.config());
//!
//! let products = ctx.catalog().products(ctx.config().product_limit).await;
//!
//! let mut cart = ctx.open_cart();
//! cart.add_to_cart(products[0].clone());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod content;
pub mod error;
pub mod search;
pub mod shopify;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod wishlist;

pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use state::StorefrontContext;
