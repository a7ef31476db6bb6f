//! Built-in marketing content used in preview mode and as the fallback when
//! the store has no matching metaobjects.

use super::{HeroContent, HomeSections, InstagramPost, SiteSettings, ValueItem};

#[must_use]
pub fn hero() -> HeroContent {
    HeroContent {
        id: "mock-hero".to_string(),
        image: "https://images.unsplash.com/photo-1441984904996-e0b6ba687e04?w=1600&q=80"
            .to_string(),
        title: "Shop by Style".to_string(),
        description: "One-of-a-kind vintage pieces, hand-picked and ready for a second life."
            .to_string(),
        label: "New Arrivals".to_string(),
        primary_button_text: "Shop Now".to_string(),
        primary_button_link: "/shop".to_string(),
        secondary_button_text: "Collections".to_string(),
        secondary_button_link: "/collections".to_string(),
    }
}

#[must_use]
pub fn site_settings() -> SiteSettings {
    SiteSettings {
        id: "mock-settings".to_string(),
        brand_name: "FORGOTTEN ESSENTIALS".to_string(),
        brand_description:
            "Thoughtfully sourced vintage and pre-loved clothing for the conscious consumer."
                .to_string(),
        instagram_url: "https://instagram.com/forgottenessentials".to_string(),
        facebook_url: "https://facebook.com/forgottenessentials".to_string(),
        tiktok_url: "https://tiktok.com/@forgottenessentials".to_string(),
        instagram_handle: "@forgottenessentials".to_string(),
    }
}

#[must_use]
pub fn home_sections() -> HomeSections {
    HomeSections {
        id: "mock-home-sections".to_string(),
        categories_heading: "Shop by Category".to_string(),
        featured_heading: "Featured Pieces".to_string(),
        featured_link_text: "View All".to_string(),
        new_arrivals_heading: "New Arrivals".to_string(),
        new_arrivals_link_text: "View All".to_string(),
    }
}

fn value_item(id: &str, icon: &str, title: &str, description: &str, order: i64) -> ValueItem {
    ValueItem {
        id: id.to_string(),
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        order,
    }
}

#[must_use]
pub fn value_items() -> Vec<ValueItem> {
    vec![
        value_item(
            "mock-value-1",
            "shield",
            "Quality Checked",
            "Every piece is inspected and graded before it is listed.",
            1,
        ),
        value_item(
            "mock-value-2",
            "leaf",
            "Sustainable",
            "Giving great clothes a second life keeps them out of landfill.",
            2,
        ),
        value_item(
            "mock-value-3",
            "truck",
            "Fast Shipping",
            "Orders are packed and shipped within two business days.",
            3,
        ),
        value_item(
            "mock-value-4",
            "heart",
            "One of a Kind",
            "Each item is unique. When it is gone, it is gone.",
            4,
        ),
    ]
}

#[must_use]
pub fn instagram_posts() -> Vec<InstagramPost> {
    [
        "photo-1523381210434-271e8be1f52b",
        "photo-1490481651871-ab68de25d43d",
        "photo-1515886657613-9f3515b0c78f",
        "photo-1529139574466-a303027c1d8b",
        "photo-1483985988355-763728e1935b",
        "photo-1445205170230-053b83016050",
    ]
    .iter()
    .zip(1_i64..)
    .map(|(photo, order)| InstagramPost {
        id: format!("mock-post-{order}"),
        image: format!("https://images.unsplash.com/{photo}?w=600&q=80"),
        link: "https://instagram.com/forgottenessentials".to_string(),
        caption: String::new(),
        order,
    })
    .collect()
}
