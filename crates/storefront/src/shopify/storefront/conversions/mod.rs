//! Conversions from Storefront API wire types to catalog types.

pub mod cart;
pub mod collections;
pub mod products;

pub use cart::convert_cart_payload;
pub use collections::convert_collection;
pub use products::convert_product;
