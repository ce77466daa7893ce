//! # Cart
//!
//! The line item list behind the storefront's shopping cart.
//!
//! ## Line Item Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Absent ──add──► Present(1) ──add──► Present(n) ──adjust(-1)──► ...    │
//! │     ▲                 │                   ▲   │                         │
//! │     │                 │                   └───┘ adjust(±k)              │
//! │     └── count ≤ 0 ◄───┴───────────────────────┘                         │
//! │                                                                         │
//! │   Cart level:  HasItems ◄──────────► Empty                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This type is plain data. Observation, the checkout view and order
//! submission live in `storefront-checkout::CartStore`, which wraps a `Cart`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Line Item
// =============================================================================

/// A product in the cart and how many of it.
///
/// The product is shared with the catalog, not copied.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    product: Arc<Product>,
    count: u32,
}

impl LineItem {
    fn new(product: Arc<Product>) -> Self {
        LineItem { product, count: 1 }
    }

    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Unit price × count.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.count)
    }
}

// =============================================================================
// Cart Change
// =============================================================================

/// What happened to the line item touched by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LineItemChangeKind {
    /// A new line item with count 1.
    Added,
    /// The count changed and the line item is still present.
    Updated,
    /// The count dropped to zero or below and the line item is gone.
    Removed,
}

/// The line item affected by one cart mutation.
///
/// For `Removed`, `count` and `line_total` are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemChange {
    pub product_id: String,
    pub kind: LineItemChangeKind,
    pub count: u32,
    pub line_total: Money,
}

impl LineItemChange {
    fn present(item: &LineItem, kind: LineItemChangeKind) -> Self {
        LineItemChange {
            product_id: item.product_id().to_string(),
            kind,
            count: item.count,
            line_total: item.line_total(),
        }
    }

    fn removed(product_id: &str) -> Self {
        LineItemChange {
            product_id: product_id.to_string(),
            kind: LineItemChangeKind::Removed,
            count: 0,
            line_total: Money::zero(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product id (adding the same product bumps its count)
/// - Every present item has `count ≥ 1`
/// - Insertion order is kept; it is the display order
/// - Totals are derived on every call, never cached
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - `None`: no-op, returns `None`
    /// - Product already in cart: count + 1
    /// - Product not in cart: new line item with count 1
    pub fn add_product(&mut self, product: Option<Arc<Product>>) -> Option<LineItemChange> {
        let product = product?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.count = item.count.saturating_add(1);
            return Some(LineItemChange::present(item, LineItemChangeKind::Updated));
        }

        let item = LineItem::new(product);
        let change = LineItemChange::present(&item, LineItemChangeKind::Added);
        self.items.push(item);
        Some(change)
    }

    /// Adds `delta` to a line item's count, removing it at zero or below.
    ///
    /// Unknown product ids are a no-op and return `None`.
    pub fn adjust_count(&mut self, product_id: &str, delta: i64) -> Option<LineItemChange> {
        let index = self.items.iter().position(|i| i.product.id == product_id)?;

        let next = i64::from(self.items[index].count).saturating_add(delta);
        if next <= 0 {
            self.items.remove(index);
            return Some(LineItemChange::removed(product_id));
        }

        let item = &mut self.items[index];
        item.count = u32::try_from(next).unwrap_or(u32::MAX);
        Some(LineItemChange::present(item, LineItemChangeKind::Updated))
    }

    /// Removes every line item, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line item counts.
    pub fn total_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.count)).sum()
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Serializable view of the whole cart.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self
                .items
                .iter()
                .map(|item| LineItemSnapshot {
                    product_id: item.product.id.clone(),
                    name: item.product.name.clone(),
                    image: item.product.image.clone(),
                    unit_price: item.product.price,
                    count: item.count,
                    line_total: item.line_total(),
                })
                .collect(),
            total_count: self.total_count(),
            total_price: self.total_price(),
        }
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// One row of a [`CartSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemSnapshot {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub unit_price: Money,
    pub count: u32,
    pub line_total: Money,
}

/// Cart contents and derived totals at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<LineItemSnapshot>,
    #[ts(type = "number")]
    pub total_count: u64,
    pub total_price: Money,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line(&self, product_id: &str) -> Option<&LineItemSnapshot> {
        self.items.iter().find(|l| l.product_id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Arc<Product> {
        Arc::new(Product::new(id, id, Money::from_cents(cents), format!("{id}.png")))
    }

    #[test]
    fn test_add_new_and_existing_product() {
        let mut cart = Cart::new();
        let a = product("a", 410);

        let first = cart.add_product(Some(a.clone())).unwrap();
        assert_eq!(first.kind, LineItemChangeKind::Added);
        assert_eq!(first.count, 1);

        let second = cart.add_product(Some(a)).unwrap();
        assert_eq!(second.kind, LineItemChangeKind::Updated);
        assert_eq!(second.count, 2);
        assert_eq!(second.line_total.cents(), 820);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_add_none_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.add_product(None).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_item_shares_catalog_product() {
        let mut cart = Cart::new();
        let a = product("a", 100);
        cart.add_product(Some(a.clone()));
        assert!(Arc::ptr_eq(cart.get("a").unwrap().product(), &a));
    }

    #[test]
    fn test_adjust_count() {
        let mut cart = Cart::new();
        let a = product("a", 100);
        cart.add_product(Some(a.clone()));
        cart.add_product(Some(a));

        let up = cart.adjust_count("a", 3).unwrap();
        assert_eq!(up.count, 5);

        let down = cart.adjust_count("a", -1).unwrap();
        assert_eq!(down.kind, LineItemChangeKind::Updated);
        assert_eq!(down.count, 4);
    }

    #[test]
    fn test_adjust_to_zero_or_below_removes() {
        let mut cart = Cart::new();
        cart.add_product(Some(product("a", 100)));
        cart.add_product(Some(product("b", 100)));

        let removed = cart.adjust_count("a", -5).unwrap();
        assert_eq!(removed.kind, LineItemChangeKind::Removed);
        assert_eq!(removed.count, 0);
        assert!(cart.get("a").is_none());
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_count(), 1);
        assert_eq!(cart.total_price().cents(), 100);
    }

    #[test]
    fn test_adjust_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_product(Some(product("a", 100)));
        assert!(cart.adjust_count("missing", 1).is_none());
        assert_eq!(cart.total_count(), 1);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        let a = product("a", 410);
        let b = product("b", 20);

        for _ in 0..3 {
            cart.add_product(Some(a.clone()));
        }
        cart.add_product(Some(b));

        assert_eq!(cart.total_count(), 4);
        assert_eq!(cart.total_price().cents(), 1250);
        assert_eq!(cart.total_price().to_string(), "€12.50");
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut cart = Cart::new();
        cart.add_product(Some(product("b", 1)));
        cart.add_product(Some(product("a", 1)));
        cart.add_product(Some(product("b", 1)));

        let ids: Vec<_> = cart.items().iter().map(LineItem::product_id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_product(Some(product("a", 1)));
        cart.add_product(Some(product("b", 1)));
        assert_eq!(cart.clear(), 2);
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::zero());
    }

    #[test]
    fn test_snapshot() {
        let mut cart = Cart::new();
        let a = product("a", 250);
        cart.add_product(Some(a.clone()));
        cart.add_product(Some(a));

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.total_count, 2);
        assert_eq!(snapshot.total_price.cents(), 500);
        let line = snapshot.line("a").unwrap();
        assert_eq!(line.count, 2);
        assert_eq!(line.unit_price.cents(), 250);
        assert_eq!(line.line_total.cents(), 500);
    }
}
