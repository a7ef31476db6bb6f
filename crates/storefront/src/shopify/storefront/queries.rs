//! GraphQL documents for the Shopify Storefront API.
//!
//! Each operation is a marker type implementing [`GraphQLQuery`] by hand:
//! the document is a string constant and the response shape is a serde
//! struct built from `shopify::types`.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};

use crate::shopify::types::{
    CartLineInput, CartLineUpdateInput, CartMutationPayload, CollectionNode, CollectionProducts,
    Connection, Metaobject, ProductNode,
};

/// Fields shared by every product selection.
macro_rules! product_card_fragment {
    () => {
        r"
fragment ProductCard on Product {
  id
  title
  handle
  description
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  compareAtPriceRange {
    minVariantPrice { amount currencyCode }
  }
  tags
  productType
}
"
    };
}

/// Selection returned by every cart mutation.
macro_rules! cart_payload {
    () => {
        r"
    cart { id checkoutUrl }
    userErrors { code field message }
"
    };
}

/// Implement [`GraphQLQuery`] for a marker type.
macro_rules! operation {
    ($name:ident, $document:expr, $variables:ty, $data:ty) => {
        pub struct $name;

        impl GraphQLQuery for $name {
            type Variables = $variables;
            type ResponseData = $data;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $document,
                    operation_name: stringify!($name),
                }
            }
        }
    };
}

// =============================================================================
// Product queries
// =============================================================================

pub const GET_PRODUCTS: &str = concat!(
    r"
query GetProducts($first: Int!) {
  products(first: $first) {
    edges {
      node {
        ...ProductCard
        images(first: 5) { edges { node { url altText } } }
        variants(first: 1) {
          edges { node { id availableForSale selectedOptions { name value } } }
        }
      }
    }
  }
}
",
    product_card_fragment!()
);

pub const GET_PRODUCT_BY_HANDLE: &str = concat!(
    r#"
query GetProductByHandle($handle: String!) {
  product(handle: $handle) {
    ...ProductCard
    images(first: 10) { edges { node { url altText } } }
    variants(first: 10) {
      edges { node { id title availableForSale selectedOptions { name value } } }
    }
    metafields(identifiers: [
      {namespace: "custom", key: "era"},
      {namespace: "custom", key: "condition"},
      {namespace: "custom", key: "brand"},
      {namespace: "custom", key: "size"},
      {namespace: "custom", key: "measurements"}
    ]) {
      key
      value
      type
    }
  }
}
"#,
    product_card_fragment!()
);

/// Variables for list queries (`$first`).
#[derive(Debug, Clone, Serialize)]
pub struct FirstVariables {
    pub first: i64,
}

/// Variables for [`GetProductByHandle`].
#[derive(Debug, Clone, Serialize)]
pub struct HandleVariables {
    pub handle: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    pub product: Option<ProductNode>,
}

operation!(GetProducts, GET_PRODUCTS, FirstVariables, ProductsData);
operation!(
    GetProductByHandle,
    GET_PRODUCT_BY_HANDLE,
    HandleVariables,
    ProductData
);

// =============================================================================
// Collection queries
// =============================================================================

pub const GET_COLLECTIONS: &str = r"
query GetCollections($first: Int!) {
  collections(first: $first) {
    edges {
      node {
        id
        title
        handle
        description
        image { url altText }
      }
    }
  }
}
";

pub const GET_PRODUCTS_BY_COLLECTION: &str = concat!(
    r"
query GetProductsByCollection($handle: String!, $first: Int!) {
  collection(handle: $handle) {
    products(first: $first) {
      edges {
        node {
          ...ProductCard
          images(first: 5) { edges { node { url altText } } }
          variants(first: 1) {
            edges { node { id availableForSale selectedOptions { name value } } }
          }
        }
      }
    }
  }
}
",
    product_card_fragment!()
);

/// Variables for [`GetProductsByCollection`].
#[derive(Debug, Clone, Serialize)]
pub struct CollectionProductsVariables {
    pub handle: String,
    pub first: i64,
}

#[derive(Debug, Deserialize)]
pub struct CollectionsData {
    pub collections: Connection<CollectionNode>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionProductsData {
    pub collection: Option<CollectionProducts>,
}

operation!(
    GetCollections,
    GET_COLLECTIONS,
    FirstVariables,
    CollectionsData
);
operation!(
    GetProductsByCollection,
    GET_PRODUCTS_BY_COLLECTION,
    CollectionProductsVariables,
    CollectionProductsData
);

// =============================================================================
// Cart mutations
// =============================================================================

pub const CREATE_CART: &str = concat!(
    r"
mutation CreateCart($lines: [CartLineInput!]!) {
  cartCreate(input: { lines: $lines }) {",
    cart_payload!(),
    r"  }
}
"
);

pub const ADD_TO_CART: &str = concat!(
    r"
mutation AddToCart($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {",
    cart_payload!(),
    r"  }
}
"
);

pub const UPDATE_CART_LINES: &str = concat!(
    r"
mutation UpdateCartLines($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {",
    cart_payload!(),
    r"  }
}
"
);

pub const REMOVE_FROM_CART: &str = concat!(
    r"
mutation RemoveFromCart($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {",
    cart_payload!(),
    r"  }
}
"
);

#[derive(Debug, Clone, Serialize)]
pub struct CreateCartVariables {
    pub lines: Vec<CartLineInput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartVariables {
    pub cart_id: String,
    pub lines: Vec<CartLineInput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartLinesVariables {
    pub cart_id: String,
    pub lines: Vec<CartLineUpdateInput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartVariables {
    pub cart_id: String,
    pub line_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartData {
    pub cart_create: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartData {
    pub cart_lines_add: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartLinesData {
    pub cart_lines_update: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartData {
    pub cart_lines_remove: Option<CartMutationPayload>,
}

operation!(CreateCart, CREATE_CART, CreateCartVariables, CreateCartData);
operation!(AddToCart, ADD_TO_CART, AddToCartVariables, AddToCartData);
operation!(
    UpdateCartLines,
    UPDATE_CART_LINES,
    UpdateCartLinesVariables,
    UpdateCartLinesData
);
operation!(
    RemoveFromCart,
    REMOVE_FROM_CART,
    RemoveFromCartVariables,
    RemoveFromCartData
);

// =============================================================================
// Metaobjects
// =============================================================================

pub const GET_METAOBJECTS: &str = r"
query GetMetaobjects($type: String!, $first: Int!) {
  metaobjects(type: $type, first: $first) {
    edges {
      node {
        id
        handle
        fields { key value }
      }
    }
  }
}
";

#[derive(Debug, Clone, Serialize)]
pub struct MetaobjectsVariables {
    #[serde(rename = "type")]
    pub kind: String,
    pub first: i64,
}

#[derive(Debug, Deserialize)]
pub struct MetaobjectsData {
    pub metaobjects: Connection<Metaobject>,
}

operation!(
    GetMetaobjects,
    GET_METAOBJECTS,
    MetaobjectsVariables,
    MetaobjectsData
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_include_fragment() {
        assert!(GET_PRODUCTS.contains("fragment ProductCard on Product"));
        assert!(GET_PRODUCTS_BY_COLLECTION.contains("...ProductCard"));
        assert!(GET_PRODUCT_BY_HANDLE.contains(r#"{namespace: "custom", key: "measurements"}"#));
    }

    #[test]
    fn test_query_body_shape() {
        let body = AddToCart::build_query(AddToCartVariables {
            cart_id: "gid://shopify/Cart/abc".to_string(),
            lines: vec![],
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "AddToCart");
        assert_eq!(json["variables"]["cartId"], "gid://shopify/Cart/abc");
        assert!(json["query"].as_str().unwrap().contains("cartLinesAdd"));
        assert!(json["query"].as_str().unwrap().contains("userErrors"));
    }

    #[test]
    fn test_metaobject_variables_rename_type() {
        let body = GetMetaobjects::build_query(MetaobjectsVariables {
            kind: "hero_section".to_string(),
            first: 1,
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["variables"]["type"], "hero_section");
    }
}
