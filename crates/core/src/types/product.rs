//! Catalog types: products, their vintage attributes, and categories.
//!
//! A [`Product`] is immutable once fetched; the catalog replaces the whole
//! list on every fetch rather than patching individual products.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::{CollectionId, ProductId};
use super::price::Price;

/// Garment condition grade.
///
/// The storefront grades pieces with a small fixed vocabulary, but labels
/// coming from the backend are free text, so unknown grades are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    LikeNew,
    Excellent,
    VeryGood,
    Good,
    Fair,
    Other(String),
}

impl Condition {
    /// Labels recognised when reading condition from product tags.
    pub const TAG_LABELS: [&'static str; 4] = ["Good", "Excellent", "Fair", "Like New"];

    /// Parse a display label; unknown labels become [`Condition::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Like New" => Self::LikeNew,
            "Excellent" => Self::Excellent,
            "Very Good" => Self::VeryGood,
            "Good" => Self::Good,
            "Fair" => Self::Fair,
            other => Self::Other(other.to_string()),
        }
    }

    /// Display label (e.g., "Very Good").
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::LikeNew => "Like New",
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Condition {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.label().to_string()
    }
}

/// Garment measurements keyed by dimension name (chest, waist, length, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Measurements(BTreeMap<String, String>);

impl Measurements {
    /// Create an empty measurement set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse the JSON object stored in the measurements metafield.
    ///
    /// String and numeric values are kept; anything else is dropped.
    /// Returns `None` for malformed JSON, non-object JSON, or an object
    /// with no usable values.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        let object: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw).ok()?;
        let dimensions: BTreeMap<String, String> = object
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::String(s) => Some((name, s)),
                serde_json::Value::Number(n) => Some((name, n.to_string())),
                _ => None,
            })
            .collect();

        if dimensions.is_empty() {
            None
        } else {
            Some(Self(dimensions))
        }
    }

    /// Set a dimension, returning the updated set.
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    /// Look up a dimension.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterate dimensions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID (numeric tail of the Shopify global id).
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL handle.
    pub slug: String,
    /// Current price.
    pub price: Price,
    /// Compare-at price when the piece is marked down.
    pub original_price: Option<Price>,
    /// Plain text description.
    pub description: String,
    /// Image URLs in display order.
    pub images: Vec<String>,
    /// Lowercase category label (e.g., "jackets").
    pub category: String,
    /// Decade or era label (e.g., "1990s").
    pub era: Option<String>,
    /// Condition grade.
    pub condition: Option<Condition>,
    /// Brand name.
    pub brand: Option<String>,
    /// Size label.
    pub size: Option<String>,
    /// Garment measurements.
    pub measurements: Option<Measurements>,
    /// Whether the piece can still be bought.
    pub in_stock: bool,
}

impl Product {
    /// Create a product with the required fields; optional attributes are
    /// empty and the piece is in stock.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: &str, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            slug: slugify(name),
            price,
            original_price: None,
            description: String::new(),
            images: Vec::new(),
            category: "uncategorized".to_string(),
            era: None,
            condition: None,
            brand: None,
            size: None,
            measurements: None,
            in_stock: true,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    #[must_use]
    pub fn with_era(mut self, era: &str) -> Self {
        self.era = Some(era.to_string());
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand: &str) -> Self {
        self.brand = Some(brand.to_string());
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: &str) -> Self {
        self.size = Some(size.to_string());
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn with_original_price(mut self, price: Price) -> Self {
        self.original_price = Some(price);
        self
    }

    #[must_use]
    pub fn with_images(mut self, images: &[&str]) -> Self {
        self.images = images.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn with_measurements(mut self, measurements: Measurements) -> Self {
        self.measurements = Some(measurements);
        self
    }

    #[must_use]
    pub const fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// First image, used for cards and cart lines.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the product is marked down from its original price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .is_some_and(|original| original.amount > self.price.amount)
    }
}

/// A browsable category or collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Collection ID.
    pub id: CollectionId,
    /// Display name.
    pub name: String,
    /// URL handle.
    pub slug: String,
    /// Cover image URL.
    pub image: Option<String>,
}

/// Turn a display name into a URL handle.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') && c != '\'' {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}
