//! # Products Grid
//!
//! Cards for the products that pass the current filter.
//!
//! ```text
//! update_filter(FilterUpdate) ──► criteria.merge ──► FilterPipeline::apply(catalog)
//!                                                              │
//!                                  cards replaced wholesale ◄──┘
//! ```
//!
//! All cards emit on the grid's single `product-add` channel.

use std::sync::{Arc, Mutex};

use storefront_core::events::lock;
use storefront_core::{EventChannel, EventName, FilterCriteria, FilterPipeline, FilterUpdate, Product};
use tracing::debug;

/// One product tile with an "add" button.
#[derive(Debug, Clone)]
pub struct ProductCard {
    product: Arc<Product>,
    adds: EventChannel<String>,
}

impl ProductCard {
    pub fn new(product: Arc<Product>, adds: EventChannel<String>) -> Self {
        ProductCard { product, adds }
    }

    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// The "add" button.
    pub fn add(&self) {
        debug!(product_id = %self.product.id, "card: add clicked");
        self.adds.emit(&self.product.id);
    }
}

#[derive(Debug)]
pub struct ProductsGrid {
    products: Vec<Arc<Product>>,
    pipeline: Mutex<FilterPipeline>,
    cards: Mutex<Vec<ProductCard>>,
    adds: EventChannel<String>,
}

impl ProductsGrid {
    /// Builds the grid showing every product.
    pub fn new(products: Vec<Arc<Product>>) -> Self {
        let grid = ProductsGrid {
            products,
            pipeline: Mutex::new(FilterPipeline::default()),
            cards: Mutex::new(Vec::new()),
            adds: EventChannel::new(EventName::ProductAdd),
        };
        grid.update_filter(FilterUpdate::default());
        grid
    }

    pub fn adds(&self) -> &EventChannel<String> {
        &self.adds
    }

    pub fn criteria(&self) -> FilterCriteria {
        lock(&self.pipeline).criteria().clone()
    }

    /// Merges `update` into the criteria and rebuilds the cards. Returns how
    /// many cards are shown.
    pub fn update_filter(&self, update: FilterUpdate) -> usize {
        let visible = {
            let mut pipeline = lock(&self.pipeline);
            pipeline.update(update);
            pipeline.apply(&self.products)
        };

        let cards: Vec<ProductCard> = visible
            .into_iter()
            .map(|product| ProductCard::new(product, self.adds.clone()))
            .collect();
        let shown = cards.len();
        *lock(&self.cards) = cards;

        debug!(shown, total = self.products.len(), "grid: filter applied");
        shown
    }

    pub fn cards(&self) -> Vec<ProductCard> {
        lock(&self.cards).clone()
    }

    /// Ids of the shown products, in catalog order.
    pub fn visible_ids(&self) -> Vec<String> {
        lock(&self.cards).iter().map(|c| c.product.id.clone()).collect()
    }

    /// Presses "add" on the shown card for `product_id`. Returns false if no
    /// such card is shown.
    pub fn add(&self, product_id: &str) -> bool {
        let card = lock(&self.cards).iter().find(|c| c.product.id == product_id).cloned();
        match card {
            Some(card) => {
                card.add();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Money;

    fn catalog() -> Vec<Arc<Product>> {
        let p = |id: &str| Product::new(id, id, Money::from_cents(500), format!("{id}.png"));
        vec![
            Arc::new(p("laab").with_category("salads").with_spiciness(2)),
            Arc::new(p("cashew").with_category("chicken").with_nuts(true).with_vegetarian(false).with_spiciness(0)),
            Arc::new(p("curry").with_category("vegetable").with_vegetarian(true).with_spiciness(4)),
            Arc::new(p("rice").with_category("side").with_vegetarian(true)),
        ]
    }

    #[test]
    fn test_shows_everything_initially() {
        let grid = ProductsGrid::new(catalog());
        assert_eq!(grid.visible_ids(), vec!["laab", "cashew", "curry", "rice"]);
    }

    #[test]
    fn test_updates_merge() {
        let grid = ProductsGrid::new(catalog());

        assert_eq!(grid.update_filter(FilterUpdate::exclude_nuts(true)), 3);
        assert_eq!(grid.update_filter(FilterUpdate::max_spiciness(2)), 2);
        assert_eq!(grid.visible_ids(), vec!["laab", "rice"]);

        grid.update_filter(FilterUpdate::category("side"));
        assert_eq!(grid.visible_ids(), vec!["rice"]);

        grid.update_filter(FilterUpdate::category(""));
        grid.update_filter(FilterUpdate::max_spiciness(4));
        assert_eq!(grid.visible_ids(), vec!["laab", "curry", "rice"]);
        assert!(grid.criteria().exclude_nuts);
    }

    #[test]
    fn test_cards_share_grid_channel() {
        let grid = ProductsGrid::new(catalog());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            grid.adds().subscribe(move |id: &String| seen.lock().unwrap().push(id.clone()))
        };

        grid.cards()[2].add();
        assert!(grid.add("rice"));

        grid.update_filter(FilterUpdate::vegetarian_only(true));
        assert!(!grid.add("cashew"));

        assert_eq!(*seen.lock().unwrap(), vec!["curry", "rice"]);
    }
}
