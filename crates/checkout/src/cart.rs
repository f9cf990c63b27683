//! In-memory cart store.
//!
//! The cart only stores `(product id, quantity)` pairs; line items and
//! totals are derived on every read by joining against the current
//! product catalog. That keeps the total consistent with the latest
//! catalog even if it reloads mid-session, and makes stale cart entries
//! (product no longer in the catalog) drop out silently.

use rust_decimal::Decimal;

use corner_market_core::Product;

/// A stored cart entry. Quantity 0 is equivalent to absence; the
/// line-item join skips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub product_id: String,
    pub quantity: u32,
}

/// A `(product, quantity)` pair derived from the cart for display and
/// total purposes. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartLineItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Quantities per product id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    entries: Vec<CartEntry>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Increment the quantity for a product id, creating the entry at 1
    /// if absent. No upper bound.
    pub fn increase(&mut self, product_id: &str) {
        if let Some(entry) = self.entry_mut(product_id) {
            entry.quantity += 1;
        } else {
            self.entries.push(CartEntry {
                product_id: product_id.to_string(),
                quantity: 1,
            });
        }
    }

    /// Decrement the quantity for a product id, saturating at 0. A
    /// decrease on an absent id is a no-op.
    pub fn decrease(&mut self, product_id: &str) {
        if let Some(entry) = self.entry_mut(product_id) {
            entry.quantity = entry.quantity.saturating_sub(1);
        }
    }

    /// Current quantity for a product id, 0 when absent.
    #[must_use]
    pub fn quantity(&self, product_id: &str) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.product_id == product_id)
            .map_or(0, |entry| entry.quantity)
    }

    /// Total quantity across all entries (cart badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.entries.iter().map(|entry| entry.quantity).sum()
    }

    /// Whether no entry has a positive quantity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| entry.quantity == 0)
    }

    /// Empty all entries. Called exactly once per confirmed order.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Join non-zero entries against the current catalog, in cart-entry
    /// order. Entries whose product id is not in the catalog are
    /// silently dropped (stale-cart tolerance).
    #[must_use]
    pub fn line_items(&self, products: &[Product]) -> Vec<CartLineItem> {
        self.entries
            .iter()
            .filter(|entry| entry.quantity > 0)
            .filter_map(|entry| {
                products
                    .iter()
                    .find(|product| product.id == entry.product_id)
                    .map(|product| CartLineItem {
                        product: product.clone(),
                        quantity: entry.quantity,
                    })
            })
            .collect()
    }

    /// Sum of `price × quantity` over the current line items. Pure
    /// recomputation on every call.
    #[must_use]
    pub fn total(&self, products: &[Product]) -> Decimal {
        self.line_items(products)
            .iter()
            .map(CartLineItem::line_price)
            .sum()
    }

    fn entry_mut(&mut self, product_id: &str) -> Option<&mut CartEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: Decimal::new(price_cents, 2),
            image: None,
            category_tags: Vec::new(),
            is_campaign: false,
            is_discounted: false,
        }
    }

    #[test]
    fn test_quantity_never_negative() {
        let mut cart = CartStore::new();
        cart.decrease("a");
        assert_eq!(cart.quantity("a"), 0);

        cart.increase("a");
        cart.increase("a");
        cart.decrease("a");
        cart.decrease("a");
        cart.decrease("a");
        assert_eq!(cart.quantity("a"), 0);
    }

    #[test]
    fn test_quantity_is_net_count_clamped_at_zero() {
        let mut cart = CartStore::new();
        for _ in 0..5 {
            cart.increase("a");
        }
        for _ in 0..2 {
            cart.decrease("a");
        }
        assert_eq!(cart.quantity("a"), 3);
    }

    #[test]
    fn test_zero_quantity_entry_not_a_line_item() {
        let mut cart = CartStore::new();
        let products = vec![product("a", 1000)];
        cart.increase("a");
        cart.decrease("a");
        assert!(cart.line_items(&products).is_empty());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_items_preserve_entry_order() {
        let mut cart = CartStore::new();
        let products = vec![product("b", 500), product("a", 1000)];
        cart.increase("a");
        cart.increase("b");
        let items = cart.line_items(&products);
        assert_eq!(items[0].product.id, "a");
        assert_eq!(items[1].product.id, "b");
    }

    #[test]
    fn test_stale_entries_dropped_at_join() {
        let mut cart = CartStore::new();
        cart.increase("gone");
        cart.increase("a");
        let products = vec![product("a", 1000)];
        let items = cart.line_items(&products);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.id, "a");
        // The stale entry still counts toward raw quantity...
        assert_eq!(cart.total_quantity(), 2);
        // ...but not toward the total.
        assert_eq!(cart.total(&products), Decimal::new(1000, 2));
    }

    #[test]
    fn test_total_matches_line_items() {
        let mut cart = CartStore::new();
        let products = vec![product("a", 1000), product("b", 500)];
        cart.increase("a");
        cart.increase("a");
        cart.increase("b");

        assert_eq!(cart.total(&products), Decimal::new(2500, 2));
        // Idempotent recomputation.
        assert_eq!(cart.total(&products), Decimal::new(2500, 2));

        let expected: Decimal = cart
            .line_items(&products)
            .iter()
            .map(CartLineItem::line_price)
            .sum();
        assert_eq!(cart.total(&products), expected);
    }

    #[test]
    fn test_total_tracks_catalog_reload() {
        let mut cart = CartStore::new();
        cart.increase("a");
        let before = vec![product("a", 1000)];
        let after = vec![product("a", 1200)];
        assert_eq!(cart.total(&before), Decimal::new(1000, 2));
        assert_eq!(cart.total(&after), Decimal::new(1200, 2));
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut cart = CartStore::new();
        cart.increase("a");
        cart.increase("b");
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
        assert_eq!(cart.quantity("a"), 0);
    }
}
