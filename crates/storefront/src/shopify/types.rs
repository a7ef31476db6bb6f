//! Wire types for the Shopify Storefront API.
//!
//! These mirror the JSON shapes selected by the documents in
//! `storefront::queries`. Conversion into catalog types lives in
//! `storefront::conversions`; callers outside the client only see
//! [`RemoteCart`] and the mutation inputs.

use serde::{Deserialize, Serialize};

use forgotten_essentials_core::{CartId, VariantId};

// =============================================================================
// Connections
// =============================================================================

/// Relay-style connection (`{ edges: [{ node }] }`).
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    /// Unwrap the edge list into its nodes, keeping order.
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|edge| edge.node)
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

/// Price range for a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Option<Money>,
}

/// Compare-at price range. Shopify reports `0.0` when no variant is marked
/// down.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareAtPriceRange {
    pub min_variant_price: Option<Money>,
}

// =============================================================================
// Product Types
// =============================================================================

/// Product or collection image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
}

/// Selected option on a variant (e.g., Size: M).
#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// A product variant as selected by the product documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub title: Option<String>,
    pub available_for_sale: bool,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

/// A metafield value. Only the `custom` namespace keys the storefront asks
/// for are ever returned.
#[derive(Debug, Clone, Deserialize)]
pub struct MetafieldNode {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Product as returned by every product document.
///
/// List documents do not select metafields, so the field defaults to empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    /// Global id (`gid://shopify/Product/123`).
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub description: String,
    pub price_range: PriceRange,
    pub compare_at_price_range: Option<CompareAtPriceRange>,
    #[serde(default)]
    pub images: Connection<ImageNode>,
    #[serde(default)]
    pub variants: Connection<VariantNode>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub product_type: String,
    /// One entry per requested identifier; unset metafields come back null.
    #[serde(default)]
    pub metafields: Vec<Option<MetafieldNode>>,
}

// =============================================================================
// Collection Types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionNode {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<ImageNode>,
}

/// Collection wrapper selected by the products-by-collection document.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionProducts {
    pub products: Connection<ProductNode>,
}

// =============================================================================
// Metaobject Types
// =============================================================================

/// Key/value field on a metaobject. Shopify returns `null` for unset values.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaobjectField {
    pub key: String,
    pub value: Option<String>,
}

/// A metaobject entry (hero section, site settings, instagram post, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Metaobject {
    pub id: String,
    pub handle: String,
    #[serde(default)]
    pub fields: Vec<MetaobjectField>,
}

impl Metaobject {
    /// Value of a field, if set and non-empty.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .and_then(|f| f.value.as_deref())
            .filter(|v| !v.is_empty())
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// Cart fields the storefront keeps after a mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartNode {
    pub id: String,
    /// Not selected by the update/remove documents.
    pub checkout_url: Option<String>,
}

/// Payload shared by every cart mutation (`cart` plus `userErrors`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<CartNode>,
    #[serde(default)]
    pub user_errors: Vec<CartUserError>,
}

/// User error from cart mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct CartUserError {
    /// Error code.
    pub code: Option<String>,
    /// Field path that caused the error.
    pub field: Option<Vec<String>>,
    /// Human-readable error message.
    pub message: String,
}

/// Remote cart reference returned by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCart {
    /// Opaque cart id (`gid://shopify/Cart/...`).
    pub id: CartId,
    /// Hosted checkout URL; absent when the mutation did not select it.
    pub checkout_url: Option<String>,
}

/// Input for adding a line to cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: String,
    /// Quantity to add.
    pub quantity: u32,
}

impl CartLineInput {
    /// One unit of a variant.
    #[must_use]
    pub fn single(merchandise_id: VariantId) -> Self {
        Self {
            merchandise_id: merchandise_id.into_inner(),
            quantity: 1,
        }
    }
}

/// Input for updating a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: String,
    /// New quantity.
    pub quantity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_node_without_metafields() {
        let json = r#"{
            "id": "gid://shopify/Product/1",
            "title": "Carhartt Work Jacket",
            "handle": "carhartt-work-jacket",
            "description": "Classic duck canvas.",
            "priceRange": {
                "minVariantPrice": {"amount": "65.0", "currencyCode": "USD"},
                "maxVariantPrice": {"amount": "65.0", "currencyCode": "USD"}
            },
            "compareAtPriceRange": {"minVariantPrice": {"amount": "0.0", "currencyCode": "USD"}},
            "images": {"edges": [{"node": {"url": "https://cdn.example/1.jpg", "altText": null}}]},
            "variants": {"edges": [{"node": {
                "id": "gid://shopify/ProductVariant/11",
                "availableForSale": true,
                "selectedOptions": [{"name": "Size", "value": "L"}]
            }}]},
            "tags": ["90s", "Brand: Carhartt"],
            "productType": "Jackets"
        }"#;

        let node: ProductNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.images.edges.len(), 1);
        assert!(node.metafields.is_empty());
        assert_eq!(node.variants.edges[0].node.selected_options[0].value, "L");
    }

    #[test]
    fn test_metaobject_field_skips_null_and_empty() {
        let json = r#"{
            "id": "gid://shopify/Metaobject/1",
            "handle": "hero",
            "fields": [
                {"key": "title", "value": "Forgotten Essentials"},
                {"key": "subtitle", "value": null},
                {"key": "cta_text", "value": ""}
            ]
        }"#;

        let object: Metaobject = serde_json::from_str(json).unwrap();
        assert_eq!(object.field("title"), Some("Forgotten Essentials"));
        assert_eq!(object.field("subtitle"), None);
        assert_eq!(object.field("cta_text"), None);
        assert_eq!(object.field("missing"), None);
    }

    #[test]
    fn test_cart_line_input_serializes_camel_case() {
        let input = CartLineInput::single(VariantId::new("gid://shopify/ProductVariant/7"));
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"merchandiseId": "gid://shopify/ProductVariant/7", "quantity": 1})
        );
    }
}
