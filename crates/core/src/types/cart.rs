//! The shopping cart and its lines.
//!
//! Every mutation helper works on an owned `Cart`; the store clones the
//! committed snapshot, applies one helper and commits the result.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::product::CatalogEntry;

/// One product in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: CatalogEntry,
    pub amount: u32,
}

impl CartLine {
    /// Start a new line for `product` with a single unit.
    ///
    /// An `amount` carried in the catalog entry's extra fields is dropped;
    /// the line's own amount takes its place.
    #[must_use]
    pub fn first_unit(mut product: CatalogEntry) -> Self {
        product.extra.remove("amount");
        Self { product, amount: 1 }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price of the whole line.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.product.price * Decimal::from(self.amount)
    }
}

/// Ordered cart lines, at most one per product, in insertion order.
///
/// Deserialization rejects snapshots that break the invariants (duplicate
/// products or zero amounts) so a corrupt snapshot is never hydrated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Quantity of a product in the cart, 0 when absent.
    #[must_use]
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |line| line.amount)
    }

    /// Append a new line with one unit of `product`.
    ///
    /// Returns `false` and leaves the cart untouched if the product already
    /// has a line.
    pub fn push_first_unit(&mut self, product: CatalogEntry) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.lines.push(CartLine::first_unit(product));
        true
    }

    /// Add one unit to an existing line, returning the new amount.
    pub fn increment(&mut self, id: ProductId) -> Option<u32> {
        let line = self.lines.iter_mut().find(|line| line.id() == id)?;
        line.amount = line.amount.saturating_add(1);
        Some(line.amount)
    }

    /// Replace the amount of an existing line.
    ///
    /// Returns `false` if the product is absent or `amount` is zero.
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        match self.lines.iter_mut().find(|line| line.id() == id) {
            Some(line) => {
                line.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Remove a product's line, keeping the order of the others.
    pub fn remove(&mut self, id: ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.id() == id)?;
        Some(self.lines.remove(index))
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.amount)).sum()
    }

    /// Sum of every line's price times amount.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::total).sum()
    }
}

/// A snapshot that breaks the cart invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCart {
    #[error("product {0} appears more than once")]
    DuplicateProduct(ProductId),
    #[error("product {0} has a zero amount")]
    ZeroAmount(ProductId),
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = InvalidCart;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if line.amount == 0 {
                return Err(InvalidCart::ZeroAmount(line.id()));
            }
            if !seen.insert(line.id()) {
                return Err(InvalidCart::DuplicateProduct(line.id()));
            }
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn entry(id: i64, price: i64) -> CatalogEntry {
        CatalogEntry::new(ProductId::new(id), format!("Shoe {id}"), Decimal::new(price, 2))
    }

    #[test]
    fn test_push_first_unit_keeps_insertion_order() {
        let mut cart = Cart::new();
        assert!(cart.push_first_unit(entry(3, 100)));
        assert!(cart.push_first_unit(entry(1, 100)));
        assert!(cart.push_first_unit(entry(2, 100)));

        let ids: Vec<i64> = cart.iter().map(|line| line.id().as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(cart.iter().all(|line| line.amount == 1));
    }

    #[test]
    fn test_push_first_unit_rejects_duplicate() {
        let mut cart = Cart::new();
        assert!(cart.push_first_unit(entry(1, 100)));
        assert!(!cart.push_first_unit(entry(1, 100)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_increment_and_set_amount() {
        let mut cart = Cart::new();
        cart.push_first_unit(entry(1, 100));

        assert_eq!(cart.increment(ProductId::new(1)), Some(2));
        assert_eq!(cart.increment(ProductId::new(9)), None);

        assert!(cart.set_amount(ProductId::new(1), 5));
        assert!(!cart.set_amount(ProductId::new(1), 0));
        assert!(!cart.set_amount(ProductId::new(9), 5));
        assert_eq!(cart.amount_of(ProductId::new(1)), 5);
        assert_eq!(cart.amount_of(ProductId::new(9)), 0);
    }

    #[test]
    fn test_remove_keeps_other_lines() {
        let mut cart = Cart::new();
        cart.push_first_unit(entry(1, 100));
        cart.push_first_unit(entry(2, 100));
        cart.push_first_unit(entry(3, 100));

        let removed = cart.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.id(), ProductId::new(2));
        assert!(cart.remove(ProductId::new(2)).is_none());

        let ids: Vec<i64> = cart.iter().map(|line| line.id().as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.push_first_unit(entry(1, 1999));
        cart.push_first_unit(entry(2, 500));
        cart.set_amount(ProductId::new(1), 2);

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Decimal::new(4498, 2));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut cart = Cart::new();
        cart.push_first_unit(entry(1, 1999));
        cart.push_first_unit(entry(2, 500));
        cart.increment(ProductId::new(2));

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_catalog_amount_does_not_shadow_line_amount() {
        let product: CatalogEntry = serde_json::from_str(
            r#"{"id":1,"title":"Runner","price":"1.00","amount":10,"brand":"Rocket"}"#,
        )
        .unwrap();
        assert!(product.extra.contains_key("amount"));

        let mut cart = Cart::new();
        cart.push_first_unit(product);
        assert!(!cart.lines()[0].product.extra.contains_key("amount"));
        assert_eq!(cart.lines()[0].product.extra.get("brand").unwrap(), "Rocket");

        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json.matches("\"amount\"").count(), 1);
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
        assert_eq!(back.amount_of(ProductId::new(1)), 1);
    }

    #[test]
    fn test_snapshot_rejects_duplicates_and_zero_amounts() {
        let duplicate = r#"[
            {"id":1,"title":"a","price":"1.00","amount":1},
            {"id":1,"title":"a","price":"1.00","amount":2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(duplicate).is_err());

        let zero = r#"[{"id":1,"title":"a","price":"1.00","amount":0}]"#;
        assert!(serde_json::from_str::<Cart>(zero).is_err());
    }
}
