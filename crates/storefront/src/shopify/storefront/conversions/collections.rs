//! Collection conversion.

use forgotten_essentials_core::{Category, CollectionId};

use crate::shopify::types::CollectionNode;

pub fn convert_collection(collection: CollectionNode) -> Category {
    Category {
        id: CollectionId::from_gid(&collection.id),
        name: collection.title,
        slug: collection.handle,
        image: collection.image.map(|i| i.url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::types::ImageNode;

    #[test]
    fn test_convert_collection() {
        let category = convert_collection(CollectionNode {
            id: "gid://shopify/Collection/42".to_string(),
            title: "90s Streetwear".to_string(),
            handle: "90s-streetwear".to_string(),
            description: String::new(),
            image: Some(ImageNode {
                url: "https://cdn.example/streetwear.jpg".to_string(),
                alt_text: None,
            }),
        });

        assert_eq!(category.id.as_str(), "42");
        assert_eq!(category.slug, "90s-streetwear");
        assert_eq!(
            category.image.as_deref(),
            Some("https://cdn.example/streetwear.jpg")
        );
    }
}
