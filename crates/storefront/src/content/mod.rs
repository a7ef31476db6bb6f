//! Marketing content backed by Shopify metaobjects.
//!
//! Each content type maps to one metaobject type. Missing fields fall back
//! to fixed defaults, and a failed fetch falls back to the built-in content,
//! so the home page always has something to render.

pub mod fixtures;

use serde::Serialize;
use tracing::{instrument, warn};

use crate::catalog::Catalog;
use crate::shopify::{Metaobject, StorefrontClient};

/// Metaobject type names.
pub mod kinds {
    pub const HERO_SECTION: &str = "hero_section";
    pub const SITE_SETTINGS: &str = "site_settings";
    pub const HOME_SECTIONS: &str = "home_sections";
    pub const VALUE_ITEM: &str = "value_item";
    pub const INSTAGRAM_POST: &str = "instagram_post";
}

// =============================================================================
// Content Types
// =============================================================================

/// Home page hero banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroContent {
    pub id: String,
    pub image: String,
    pub title: String,
    pub description: String,
    pub label: String,
    pub primary_button_text: String,
    pub primary_button_link: String,
    pub secondary_button_text: String,
    pub secondary_button_link: String,
}

impl HeroContent {
    fn from_metaobject(object: &Metaobject) -> Self {
        let field = |key, default| text(object, key, default);
        Self {
            id: object.id.clone(),
            image: field("image", ""),
            title: field("title", "Shop by Style"),
            description: field("description", ""),
            label: field("label", "New Arrivals"),
            primary_button_text: field("primary_button_text", "Shop Now"),
            primary_button_link: field("primary_button_link", "/shop"),
            secondary_button_text: field("secondary_button_text", "Collections"),
            secondary_button_link: field("secondary_button_link", "/collections"),
        }
    }
}

/// Brand name, description and social links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSettings {
    pub id: String,
    pub brand_name: String,
    pub brand_description: String,
    pub instagram_url: String,
    pub facebook_url: String,
    pub tiktok_url: String,
    pub instagram_handle: String,
}

impl SiteSettings {
    fn from_metaobject(object: &Metaobject) -> Self {
        let field = |key, default| text(object, key, default);
        Self {
            id: object.id.clone(),
            brand_name: field("brand_name", "FORGOTTEN ESSENTIALS"),
            brand_description: field(
                "brand_description",
                "Thoughtfully sourced vintage and pre-loved clothing for the conscious consumer.",
            ),
            instagram_url: field(
                "instagram_url",
                "https://instagram.com/forgottenessentials",
            ),
            facebook_url: field("facebook_url", "https://facebook.com/forgottenessentials"),
            tiktok_url: field("tiktok_url", "https://tiktok.com/@forgottenessentials"),
            instagram_handle: field("instagram_handle", "@forgottenessentials"),
        }
    }
}

/// Section headings on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeSections {
    pub id: String,
    pub categories_heading: String,
    pub featured_heading: String,
    pub featured_link_text: String,
    pub new_arrivals_heading: String,
    pub new_arrivals_link_text: String,
}

impl HomeSections {
    fn from_metaobject(object: &Metaobject) -> Self {
        let field = |key, default| text(object, key, default);
        Self {
            id: object.id.clone(),
            categories_heading: field("categories_heading", "Shop by Category"),
            featured_heading: field("featured_heading", "Featured Pieces"),
            featured_link_text: field("featured_link_text", "View All"),
            new_arrivals_heading: field("new_arrivals_heading", "New Arrivals"),
            new_arrivals_link_text: field("new_arrivals_link_text", "View All"),
        }
    }
}

/// One of the value-proposition boxes on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueItem {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub order: i64,
}

impl ValueItem {
    fn from_metaobject(object: &Metaobject) -> Self {
        Self {
            id: object.id.clone(),
            icon: text(object, "icon", "shield"),
            title: text(object, "title", ""),
            description: text(object, "description", ""),
            order: parse_order(object.field("order")),
        }
    }
}

/// A tile in the Instagram feed strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstagramPost {
    pub id: String,
    pub image: String,
    pub link: String,
    pub caption: String,
    pub order: i64,
}

impl InstagramPost {
    fn from_metaobject(object: &Metaobject) -> Self {
        Self {
            id: object.id.clone(),
            image: text(object, "image", ""),
            link: text(object, "link", ""),
            caption: text(object, "caption", ""),
            order: parse_order(object.field("order")),
        }
    }
}

// =============================================================================
// SiteContent
// =============================================================================

/// Reads marketing content, remote when a store is configured.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    client: Option<StorefrontClient>,
}

impl SiteContent {
    /// Content from the given store, or built-in content when `None`.
    #[must_use]
    pub const fn new(client: Option<StorefrontClient>) -> Self {
        Self { client }
    }

    /// Content for the session's catalog: remote only when the catalog is.
    #[must_use]
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.client().cloned())
    }

    /// Hero banner.
    #[instrument(skip(self))]
    pub async fn hero(&self) -> HeroContent {
        self.first(kinds::HERO_SECTION)
            .await
            .map_or_else(fixtures::hero, |o| HeroContent::from_metaobject(&o))
    }

    /// Brand settings.
    #[instrument(skip(self))]
    pub async fn site_settings(&self) -> SiteSettings {
        self.first(kinds::SITE_SETTINGS)
            .await
            .map_or_else(fixtures::site_settings, |o| SiteSettings::from_metaobject(&o))
    }

    /// Home page headings.
    #[instrument(skip(self))]
    pub async fn home_sections(&self) -> HomeSections {
        self.first(kinds::HOME_SECTIONS)
            .await
            .map_or_else(fixtures::home_sections, |o| HomeSections::from_metaobject(&o))
    }

    /// Value items sorted by `order`.
    #[instrument(skip(self))]
    pub async fn value_items(&self, limit: usize) -> Vec<ValueItem> {
        let Some(objects) = self.fetch(kinds::VALUE_ITEM, limit).await else {
            return fixtures::value_items().into_iter().take(limit).collect();
        };

        let mut items: Vec<ValueItem> = objects.iter().map(ValueItem::from_metaobject).collect();
        items.sort_by_key(|item| item.order);
        items
    }

    /// Instagram feed tiles sorted by `order`.
    #[instrument(skip(self))]
    pub async fn instagram_posts(&self, limit: usize) -> Vec<InstagramPost> {
        let Some(objects) = self.fetch(kinds::INSTAGRAM_POST, limit).await else {
            return fixtures::instagram_posts().into_iter().take(limit).collect();
        };

        let mut posts: Vec<InstagramPost> =
            objects.iter().map(InstagramPost::from_metaobject).collect();
        posts.sort_by_key(|post| post.order);
        posts
    }

    /// First entry of a singleton metaobject type, if the store has one.
    async fn first(&self, kind: &str) -> Option<Metaobject> {
        self.fetch(kind, 1).await?.into_iter().next()
    }

    /// `None` when there is no store or the fetch failed.
    async fn fetch(&self, kind: &str, first: usize) -> Option<Vec<Metaobject>> {
        let client = self.client.as_ref()?;
        match client.get_metaobjects(kind, first).await {
            Ok(objects) => Some(objects),
            Err(e) => {
                warn!(error = %e, kind = %kind, "Failed to fetch content, using fallback");
                None
            }
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn text(object: &Metaobject, key: &str, default: &str) -> String {
    object.field(key).unwrap_or(default).to_string()
}

fn parse_order(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn metaobject(fields: &[(&str, &str)]) -> Metaobject {
        serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Metaobject/9",
            "handle": "entry",
            "fields": fields
                .iter()
                .map(|(k, v)| serde_json::json!({"key": k, "value": v}))
                .collect::<Vec<_>>()
        }))
        .unwrap()
    }

    #[test]
    fn test_hero_defaults_for_missing_fields() {
        let hero = HeroContent::from_metaobject(&metaobject(&[
            ("image", "https://cdn.example/hero.jpg"),
            ("title", ""),
        ]));

        assert_eq!(hero.id, "gid://shopify/Metaobject/9");
        assert_eq!(hero.image, "https://cdn.example/hero.jpg");
        assert_eq!(hero.title, "Shop by Style");
        assert_eq!(hero.primary_button_link, "/shop");
        assert_eq!(hero.secondary_button_text, "Collections");
    }

    #[test]
    fn test_site_settings_override() {
        let settings = SiteSettings::from_metaobject(&metaobject(&[(
            "instagram_handle",
            "@fe.vintage",
        )]));
        assert_eq!(settings.instagram_handle, "@fe.vintage");
        assert_eq!(settings.brand_name, "FORGOTTEN ESSENTIALS");
    }

    #[test]
    fn test_value_item_order_parsing() {
        let item = ValueItem::from_metaobject(&metaobject(&[("title", "Curated"), ("order", "3")]));
        assert_eq!(item.order, 3);
        assert_eq!(item.icon, "shield");

        let unordered = ValueItem::from_metaobject(&metaobject(&[("order", "first")]));
        assert_eq!(unordered.order, 0);
    }

    #[tokio::test]
    async fn test_without_store_uses_fixtures() {
        let content = SiteContent::default();

        assert_eq!(content.hero().await, fixtures::hero());
        assert_eq!(content.site_settings().await.brand_name, "FORGOTTEN ESSENTIALS");
        assert_eq!(content.home_sections().await, fixtures::home_sections());
        assert_eq!(content.value_items(10).await.len(), 4);
        assert_eq!(content.instagram_posts(3).await.len(), 3);
    }

    #[test]
    fn test_fixture_lists_are_ordered() {
        let orders: Vec<_> = fixtures::instagram_posts().iter().map(|p| p.order).collect();
        let mut sorted = orders.clone();
        sorted.sort_unstable();
        assert_eq!(orders, sorted);
    }
}
