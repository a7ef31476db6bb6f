//! Built-in preview catalog.
//!
//! Shown when no store is configured and the mock-data toggle is on.

use forgotten_essentials_core::{Category, CollectionId, Condition, Measurements, Price, Product};

fn category(id: &str, name: &str, slug: &str, image: &str) -> Category {
    Category {
        id: CollectionId::new(id),
        name: name.to_string(),
        slug: slug.to_string(),
        image: Some(image.to_string()),
    }
}

/// The five base categories.
#[must_use]
pub fn categories() -> Vec<Category> {
    vec![
        category(
            "1",
            "Jackets",
            "jackets",
            "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=800&q=80",
        ),
        category(
            "2",
            "Shirts",
            "shirts",
            "https://images.unsplash.com/photo-1564257631407-4deb1f99d992?w=800&q=80",
        ),
        category(
            "3",
            "Tees",
            "tees",
            "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=800&q=80",
        ),
        category(
            "4",
            "Pants",
            "pants",
            "https://images.unsplash.com/photo-1542272604-787c3835535d?w=800&q=80",
        ),
        category(
            "5",
            "Accessories",
            "accessories",
            "https://images.unsplash.com/photo-1606760227091-3dd870d97f1d?w=800&q=80",
        ),
    ]
}

/// Themed collections shown on the collections page.
#[must_use]
pub fn featured_collections() -> Vec<Category> {
    vec![
        category(
            "101",
            "90s Workwear",
            "90s-workwear",
            "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?w=800&q=80",
        ),
        category(
            "102",
            "Band & Tour Tees",
            "band-tour-tees",
            "https://images.unsplash.com/photo-1503342217505-b0a15ec3261c?w=800&q=80",
        ),
        category(
            "103",
            "Leather & Outerwear",
            "leather-outerwear",
            "https://images.unsplash.com/photo-1521223890158-f9f7c3d5d504?w=800&q=80",
        ),
        category(
            "104",
            "Grunge Revival",
            "grunge-revival",
            "https://images.unsplash.com/photo-1525450824786-227cbef70703?w=800&q=80",
        ),
    ]
}

/// The eight preview pieces.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        Product::new("1", "Carhartt Work Jacket", Price::usd(65))
            .with_original_price(Price::usd(85))
            .with_description(
                "Worn-in Carhartt work jacket from the 1990s. Heavy canvas with faded brown color \
                 and authentic workwear patina. Zip front with button closures and multiple pockets.",
            )
            .with_images(&[
                "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?w=800&q=80",
                "https://images.unsplash.com/photo-1594938298603-c8148c4dae35?w=800&q=80",
            ])
            .with_category("jackets")
            .with_era("1990s")
            .with_size("L")
            .with_condition(Condition::Good)
            .with_brand("Carhartt")
            .with_measurements(
                Measurements::new()
                    .with("chest", "46\"")
                    .with("length", "28\"")
                    .with("shoulders", "20\"")
                    .with("sleeves", "24\""),
            ),
        Product::new("2", "Vintage Band Tee - Nirvana", Price::usd(45))
            .with_description(
                "1990s Nirvana tour tee with faded black print. Soft, worn-in cotton with authentic \
                 vintage fade and cracking on the graphic. Single stitch construction.",
            )
            .with_images(&[
                "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=800&q=80",
                "https://images.unsplash.com/photo-1503342217505-b0a15ec3261c?w=800&q=80",
            ])
            .with_category("tees")
            .with_era("1990s")
            .with_size("L")
            .with_condition(Condition::Good)
            .with_measurements(Measurements::new().with("chest", "42\"").with("length", "28\"")),
        Product::new("3", "Leather Biker Jacket", Price::usd(125))
            .with_original_price(Price::usd(165))
            .with_description(
                "Worn 1990s black leather motorcycle jacket. Broken-in leather with natural patina. \
                 Asymmetric zip, multiple pockets. Some scuffs add character.",
            )
            .with_images(&[
                "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=800&q=80",
                "https://images.unsplash.com/photo-1521223890158-f9f7c3d5d504?w=800&q=80",
            ])
            .with_category("jackets")
            .with_era("1990s")
            .with_size("M")
            .with_condition(Condition::Good)
            .with_measurements(
                Measurements::new()
                    .with("chest", "40\"")
                    .with("length", "24\"")
                    .with("shoulders", "17\"")
                    .with("sleeves", "25\""),
            ),
        Product::new("4", "Flannel Shirt - Red Plaid", Price::usd(32))
            .with_description(
                "1990s thick cotton flannel in red and black plaid. Button-down with chest pockets. \
                 Soft and broken-in, perfect layering piece.",
            )
            .with_images(&[
                "https://images.unsplash.com/photo-1525450824786-227cbef70703?w=800&q=80",
                "https://images.unsplash.com/photo-1598032895397-b9c37ef1b95c?w=800&q=80",
            ])
            .with_category("shirts")
            .with_era("1990s")
            .with_size("L")
            .with_condition(Condition::Good)
            .with_measurements(
                Measurements::new()
                    .with("chest", "44\"")
                    .with("length", "30\"")
                    .with("sleeves", "24\""),
            ),
        Product::new("5", "Levi's 501 Jeans", Price::usd(48))
            .with_description(
                "1990s Levi's 501 jeans with vintage fade. Straight leg fit. Authentic worn-in look.",
            )
            .with_images(&[
                "https://images.unsplash.com/photo-1542272604-787c3835535d?w=800&q=80",
                "https://images.unsplash.com/photo-1541099649105-f69ad21f3246?w=800&q=80",
            ])
            .with_category("pants")
            .with_era("1990s")
            .with_size("32")
            .with_condition(Condition::Good)
            .with_brand("Levi's")
            .with_measurements(Measurements::new().with("waist", "32\"").with("length", "32\"")),
        Product::new("6", "Champion Reverse Weave Hoodie", Price::usd(58))
            .with_description(
                "1990s Champion reverse weave hoodie in faded grey. Heavy cotton construction with \
                 iconic side panels. Drawstring hood and kangaroo pocket.",
            )
            .with_images(&[
                "https://images.unsplash.com/photo-1556821840-3a63f95609a7?w=800&q=80",
                "https://images.unsplash.com/photo-1578632292335-df3abbb0d586?w=800&q=80",
            ])
            .with_category("shirts")
            .with_era("1990s")
            .with_size("XL")
            .with_condition(Condition::Good)
            .with_brand("Champion")
            .with_measurements(Measurements::new().with("chest", "48\"").with("length", "28\"")),
        Product::new("7", "Dickies Work Pants", Price::usd(38))
            .with_description(
                "1990s Dickies work pants in tan. Durable twill cotton with straight leg fit. Belt \
                 loops and multiple pockets. Classic workwear staple.",
            )
            .with_images(&[
                "https://images.unsplash.com/photo-1473966968600-fa801b869a1a?w=800&q=80",
                "https://images.unsplash.com/photo-1624378439575-d8705ad7ae80?w=800&q=80",
            ])
            .with_category("pants")
            .with_era("1990s")
            .with_size("34")
            .with_condition(Condition::Good)
            .with_brand("Dickies")
            .with_measurements(Measurements::new().with("waist", "34\"").with("length", "32\"")),
        Product::new("8", "Vintage Snapback Cap", Price::usd(28))
            .with_description(
                "1990s snapback hat with faded logo. Adjustable plastic snap closure. Curved brim \
                 with some wear. Authentic vintage headwear.",
            )
            .with_images(&[
                "https://images.unsplash.com/photo-1588850561407-ed78c282e89b?w=800&q=80",
                "https://images.unsplash.com/photo-1575428652377-a2d80e2277fc?w=800&q=80",
            ])
            .with_category("accessories")
            .with_era("1990s")
            .with_size("One Size")
            .with_condition(Condition::Good),
    ]
}
