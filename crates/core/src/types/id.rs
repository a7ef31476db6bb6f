//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! Shopify identifies everything with opaque strings (global ids such as
//! `gid://shopify/Product/123`), so the wrappers hold a `String`.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use forgotten_essentials_core::define_id;
/// define_id!(OrderId);
/// define_id!(ShipmentId);
///
/// let order_id = OrderId::new("1");
/// let shipment_id = ShipmentId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: OrderId = shipment_id;
/// assert_eq!(order_id.as_str(), shipment_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(VariantId);
define_id!(CollectionId);
define_id!(CartId);
define_id!(UserId);

/// Prefix of Shopify product variant global ids.
const VARIANT_GID_PREFIX: &str = "gid://shopify/ProductVariant/";

/// Strip a Shopify global id down to its trailing segment.
///
/// `gid://shopify/Product/123` becomes `123`; ids without a `/` are returned
/// unchanged.
#[must_use]
pub fn gid_tail(gid: &str) -> &str {
    match gid.rsplit_once('/') {
        Some((_, tail)) if !tail.is_empty() => tail,
        _ => gid,
    }
}

impl ProductId {
    /// Build a product id from a Shopify global id.
    #[must_use]
    pub fn from_gid(gid: &str) -> Self {
        Self::new(gid_tail(gid))
    }
}

impl CollectionId {
    /// Build a collection id from a Shopify global id.
    #[must_use]
    pub fn from_gid(gid: &str) -> Self {
        Self::new(gid_tail(gid))
    }
}

impl VariantId {
    /// Build the merchandise id used by cart mutations for a product.
    ///
    /// Products are one-of-a-kind, so the product id doubles as the numeric
    /// part of its single variant id.
    #[must_use]
    pub fn from_product_id(product_id: &ProductId) -> Self {
        Self(format!("{VARIANT_GID_PREFIX}{product_id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gid_tail() {
        assert_eq!(gid_tail("gid://shopify/Product/123"), "123");
        assert_eq!(gid_tail("123"), "123");
        assert_eq!(gid_tail("gid://shopify/Product/"), "gid://shopify/Product/");
    }

    #[test]
    fn test_product_id_from_gid() {
        let id = ProductId::from_gid("gid://shopify/Product/8812");
        assert_eq!(id.as_str(), "8812");
    }

    #[test]
    fn test_variant_id_from_product_id() {
        let variant = VariantId::from_product_id(&ProductId::new("7"));
        assert_eq!(variant.as_str(), "gid://shopify/ProductVariant/7");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&CartId::new("gid://shopify/Cart/abc")).ok();
        assert_eq!(json.as_deref(), Some("\"gid://shopify/Cart/abc\""));
    }
}
