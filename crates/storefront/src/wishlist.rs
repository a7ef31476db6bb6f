//! Saved items.

use forgotten_essentials_core::{Product, ProductId};

/// Products the shopper has saved for later, in the order they were saved.
#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Save a product. Returns `false` if it was already saved.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    /// Returns `false` if the product was not saved.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|p| &p.id != product_id);
        self.items.len() != before
    }

    /// Save the product if it is not saved, otherwise remove it.
    ///
    /// Returns whether the product is saved afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.remove(&product.id) {
            false
        } else {
            self.items.push(product);
            true
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == product_id)
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use forgotten_essentials_core::Price;

    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product::new(id, name, Price::usd(40))
    }

    #[test]
    fn test_add_ignores_duplicates() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add(product("1", "Carhartt Work Jacket")));
        assert!(!wishlist.add(product("1", "Carhartt Work Jacket")));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.toggle(product("1", "Carhartt Work Jacket")));
        assert!(wishlist.contains(&ProductId::new("1")));
        assert!(!wishlist.toggle(product("1", "Carhartt Work Jacket")));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_keeps_save_order() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product("2", "Levi's 501 Jeans"));
        wishlist.add(product("1", "Carhartt Work Jacket"));
        wishlist.add(product("3", "Flannel Shirt"));
        assert!(wishlist.remove(&ProductId::new("1")));
        assert!(!wishlist.remove(&ProductId::new("1")));

        let ids: Vec<_> = wishlist.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);

        wishlist.clear();
        assert!(wishlist.is_empty());
    }
}
