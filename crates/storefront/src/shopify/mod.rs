//! Shopify Storefront API access.
//!
//! Catalog reads go through a `moka` cache; cart mutations always hit the
//! API. Nothing is synced to local storage.
//!
//! ```rust,ignore
//! let client = StorefrontClient::new(&config.shopify, config.cache_ttl)?;
//! let product = client.get_product_by_handle("carhartt-work-jacket").await?;
//! let cart = client
//!     .create_cart(vec![CartLineInput::single(VariantId::from_product_id(&product.id))])
//!     .await?;
//! ```

mod storefront;
pub mod types;

pub use storefront::StorefrontClient;
pub use types::*;

use thiserror::Error;

/// Ways a Storefront API call can fail.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// The request never got a response.
    #[error("request to Shopify failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Shopify answered with a non-success status.
    #[error("Shopify returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Throttled; the value is the `Retry-After` delay in seconds.
    #[error("Shopify is throttling requests, retry in {0}s")]
    RateLimited(u64),

    /// The response body was not the expected JSON.
    #[error("malformed Shopify response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response carried a top-level `errors` list.
    #[error("{}", join_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// The response had neither `data` nor `errors`.
    #[error("Shopify sent no data for {0}")]
    NoData(&'static str),

    /// A cart mutation came back without a cart or `userErrors`.
    #[error("Shopify did not return a cart after {0}")]
    EmptyCartPayload(String),

    /// Shopify refused a cart mutation; holds the joined `userErrors`.
    #[error("cart rejected: {0}")]
    CartRejected(String),

    /// No product has the requested handle.
    #[error("no product with handle {0:?}")]
    ProductNotFound(String),

    /// No usable store credentials were configured.
    #[error("Shopify storefront is not configured")]
    NotConfigured,
}

/// One entry of a response's `errors` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQLError {
    pub message: String,
    /// Dotted response path, e.g. `cartCreate.cart.lines`.
    pub path: Option<String>,
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(e: graphql_client::Error) -> Self {
        let path = e.path.filter(|p| !p.is_empty()).map(|fragments| {
            fragments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(".")
        });
        Self {
            message: e.message,
            path,
        }
    }
}

impl std::fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} (at {path})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

fn join_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "Shopify reported an empty error list".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use graphql_client::PathFragment;

    use super::*;

    #[test]
    fn test_error_path_is_dotted() {
        let err = GraphQLError::from(graphql_client::Error {
            message: "Variable $lines is invalid".to_string(),
            locations: None,
            path: Some(vec![
                PathFragment::Key("cartLinesAdd".to_string()),
                PathFragment::Key("lines".to_string()),
                PathFragment::Index(0),
            ]),
            extensions: None,
        });
        assert_eq!(err.path.as_deref(), Some("cartLinesAdd.lines.0"));
        assert_eq!(err.to_string(), "Variable $lines is invalid (at cartLinesAdd.lines.0)");
    }

    #[test]
    fn test_graphql_errors_joined() {
        let err = ShopifyError::GraphQL(vec![
            GraphQLError {
                message: "Throttled".to_string(),
                path: None,
            },
            GraphQLError {
                message: "Access denied for metaobjects field".to_string(),
                path: Some("metaobjects".to_string()),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Throttled; Access denied for metaobjects field (at metaobjects)"
        );
        assert_eq!(
            ShopifyError::GraphQL(vec![]).to_string(),
            "Shopify reported an empty error list"
        );
    }

    #[test]
    fn test_missing_handle_message() {
        let err = ShopifyError::ProductNotFound("levis-501-jeans".to_string());
        assert_eq!(err.to_string(), "no product with handle \"levis-501-jeans\"");
    }

    #[test]
    fn test_cart_failures() {
        assert_eq!(
            ShopifyError::CartRejected("Merchandise is sold out".to_string()).to_string(),
            "cart rejected: Merchandise is sold out"
        );
        assert_eq!(
            ShopifyError::EmptyCartPayload("create cart".to_string()).to_string(),
            "Shopify did not return a cart after create cart"
        );
    }

    #[test]
    fn test_transport_failures() {
        assert_eq!(
            ShopifyError::Status {
                status: 502,
                body: "Bad Gateway".to_string()
            }
            .to_string(),
            "Shopify returned HTTP 502: Bad Gateway"
        );
        assert_eq!(
            ShopifyError::RateLimited(2).to_string(),
            "Shopify is throttling requests, retry in 2s"
        );
    }
}
