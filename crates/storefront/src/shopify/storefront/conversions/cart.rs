//! Cart mutation payload conversion.

use forgotten_essentials_core::CartId;

use crate::shopify::ShopifyError;
use crate::shopify::types::{CartMutationPayload, RemoteCart};

/// Turn a cart mutation payload into a [`RemoteCart`].
///
/// `userErrors` win over a returned cart; a payload with neither is reported
/// as a failed `operation`.
pub fn convert_cart_payload(
    payload: Option<CartMutationPayload>,
    operation: &str,
) -> Result<RemoteCart, ShopifyError> {
    if let Some(result) = payload {
        if !result.user_errors.is_empty() {
            return Err(ShopifyError::CartRejected(
                result
                    .user_errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            ));
        }

        if let Some(cart) = result.cart {
            return Ok(RemoteCart {
                id: CartId::new(cart.id),
                checkout_url: cart.checkout_url,
            });
        }
    }

    Err(ShopifyError::EmptyCartPayload(operation.to_string()))
}
