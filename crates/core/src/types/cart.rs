//! Local cart lines.
//!
//! [`CartLines`] is the source of truth for what the shopper sees in the
//! cart. It holds at most one line per product and never stores a line with
//! a quantity below one. Totals are recomputed on every call.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{CurrencyCode, Price};
use super::product::Product;

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line (unit price × quantity).
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// The set of cart lines, keyed by product identity and kept in insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLines {
    lines: Vec<CartLine>,
}

impl CartLines {
    /// Create an empty line set.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line for the product, or appends a new line
    /// with quantity 1. Returns the line's new quantity.
    pub fn upsert(&mut self, product: Product) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine {
            product,
            quantity: 1,
        });
        1
    }

    /// Remove the line for a product. Returns the removed line, if any.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| &l.product.id == product_id)?;
        Some(self.lines.remove(index))
    }

    /// Overwrite a line's quantity.
    ///
    /// A quantity of zero or less removes the line; anything above
    /// `u32::MAX` is clamped. Quantities for products not in the cart are
    /// ignored. Returns `true` if a line changed.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id).is_some();
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self.lines.iter_mut().find(|l| &l.product.id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Iterate lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Currency of the cart: that of the first line, USD when empty.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.lines
            .first()
            .map_or(CurrencyCode::USD, |l| l.product.price.currency_code)
    }

    /// Sum of price × quantity across all lines.
    ///
    /// A cart is priced in a single currency (see [`CartLines::currency`]).
    /// Lines priced in any other currency are left out of the total rather
    /// than added as if the amounts were comparable.
    #[must_use]
    pub fn total_price(&self) -> Price {
        let currency = self.currency();
        self.lines
            .iter()
            .filter(|line| line.product.price.currency_code == currency)
            .fold(Price::zero(currency), |total, line| {
                total.plus(&line.line_price())
            })
    }
}

impl<'a> IntoIterator for &'a CartLines {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
