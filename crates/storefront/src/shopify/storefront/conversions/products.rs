//! Product conversion.
//!
//! Vintage attributes are read from `custom.*` metafields when the document
//! selected them, then from merchandising tags, then from fixed defaults.

use forgotten_essentials_core::{Condition, CurrencyCode, Measurements, Price, Product, ProductId};
use tracing::warn;

use crate::shopify::types::{MetafieldNode, Money, ProductNode};

const DEFAULT_ERA: &str = "Vintage";
const DEFAULT_SIZE: &str = "N/A";
const BRAND_TAG_PREFIX: &str = "Brand:";
const ERA_TAG_MARKERS: [&str; 2] = ["90s", "80s"];

pub fn convert_product(product: ProductNode) -> Product {
    let metafield = |key: &str| find_metafield(&product.metafields, key);

    let first_variant = product.variants.edges.first().map(|e| &e.node);

    let era = metafield("era")
        .or_else(|| {
            product
                .tags
                .iter()
                .find(|tag| ERA_TAG_MARKERS.iter().any(|m| tag.contains(m)))
                .cloned()
        })
        .unwrap_or_else(|| DEFAULT_ERA.to_string());

    let condition = metafield("condition")
        .or_else(|| {
            product
                .tags
                .iter()
                .find(|tag| Condition::TAG_LABELS.iter().any(|label| *label == tag.as_str()))
                .cloned()
        })
        .map_or(Condition::Good, |label| Condition::from_label(&label));

    let brand = metafield("brand").or_else(|| {
        product
            .tags
            .iter()
            .find_map(|tag| tag.strip_prefix(BRAND_TAG_PREFIX))
            .map(|b| b.trim().to_string())
    });

    let size = metafield("size")
        .or_else(|| {
            first_variant.and_then(|v| {
                v.selected_options
                    .iter()
                    .find(|o| o.name == "Size")
                    .map(|o| o.value.clone())
            })
        })
        .unwrap_or_else(|| DEFAULT_SIZE.to_string());

    let measurements = metafield("measurements").and_then(|raw| Measurements::from_json(&raw));

    let in_stock = first_variant.is_some_and(|v| v.available_for_sale);

    let original_price = product
        .compare_at_price_range
        .as_ref()
        .and_then(|r| r.min_variant_price.as_ref())
        .map(|m| convert_money(m, &product.handle))
        .filter(|p| !p.is_zero());

    let category = if product.product_type.trim().is_empty() {
        "uncategorized".to_string()
    } else {
        product.product_type.to_lowercase()
    };

    Product {
        id: ProductId::from_gid(&product.id),
        price: convert_money(&product.price_range.min_variant_price, &product.handle),
        original_price,
        name: product.title,
        slug: product.handle,
        description: product.description,
        images: product.images.into_nodes().map(|i| i.url).collect(),
        category,
        era: Some(era),
        condition: Some(condition),
        brand,
        size: Some(size),
        measurements,
        in_stock,
    }
}

fn find_metafield(metafields: &[Option<MetafieldNode>], key: &str) -> Option<String> {
    metafields
        .iter()
        .flatten()
        .find(|m| m.key == key)
        .map(|m| m.value.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Parse a wire amount.
///
/// An unreadable currency code keeps the amount in the default currency;
/// only an unreadable amount falls back to zero. Either way the listing is
/// kept and a warning logged.
fn convert_money(money: &Money, handle: &str) -> Price {
    let currency = money.currency_code.parse::<CurrencyCode>().unwrap_or_else(|e| {
        warn!(handle = %handle, error = %e, "Unreadable currency code");
        CurrencyCode::default()
    });
    Price::parse_amount(&money.amount, currency).unwrap_or_else(|e| {
        warn!(handle = %handle, error = %e, "Unparsable product price");
        Price::zero(currency)
    })
}
