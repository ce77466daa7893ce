//! # Filter Pipeline
//!
//! Projects the catalog to the products matching the current criteria.
//!
//! ## Predicate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A product passes when ALL active criteria pass:                        │
//! │                                                                         │
//! │  exclude_nuts     ──► reject if product.nuts == Some(true)              │
//! │  vegetarian_only  ──► reject if product.vegeterian == Some(false)       │
//! │  max_spiciness    ──► reject if product.spiciness > max                 │
//! │  category         ──► reject unless product.category == category        │
//! │                                                                         │
//! │  A product WITHOUT the attribute passes that criterion,                 │
//! │  except category, which requires an exact match.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole catalog is re-scanned on every change and the result replaces
//! the previous one. Catalog order is kept.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, Spiciness};

// =============================================================================
// Criteria
// =============================================================================

/// The active filter set. `Default` filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterCriteria {
    pub exclude_nuts: bool,
    pub vegetarian_only: bool,
    pub max_spiciness: Option<Spiciness>,
    /// `None` shows every category.
    pub category: Option<String>,
}

impl FilterCriteria {
    /// Merges a partial update. Fields absent from the update keep their value.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(exclude_nuts) = update.exclude_nuts {
            self.exclude_nuts = exclude_nuts;
        }
        if let Some(vegetarian_only) = update.vegetarian_only {
            self.vegetarian_only = vegetarian_only;
        }
        if let Some(max_spiciness) = update.max_spiciness {
            self.max_spiciness = Some(max_spiciness);
        }
        if let Some(category) = update.category {
            self.category = category;
        }
    }

    /// Evaluates the conjunctive predicate for one product.
    pub fn matches(&self, product: &Product) -> bool {
        if self.exclude_nuts && product.contains_nuts == Some(true) {
            return false;
        }
        if self.vegetarian_only && product.is_vegetarian == Some(false) {
            return false;
        }
        if let (Some(max), Some(spiciness)) = (self.max_spiciness, product.spiciness) {
            if spiciness > max {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if product.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        true
    }
}

/// A partial change to [`FilterCriteria`].
///
/// Each widget event produces an update touching one field; `None` means
/// "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub exclude_nuts: Option<bool>,
    pub vegetarian_only: Option<bool>,
    pub max_spiciness: Option<Spiciness>,
    /// `Some(None)` clears the category filter.
    pub category: Option<Option<String>>,
}

impl FilterUpdate {
    pub fn exclude_nuts(value: bool) -> Self {
        FilterUpdate {
            exclude_nuts: Some(value),
            ..Default::default()
        }
    }

    pub fn vegetarian_only(value: bool) -> Self {
        FilterUpdate {
            vegetarian_only: Some(value),
            ..Default::default()
        }
    }

    pub fn max_spiciness(level: u32) -> Self {
        FilterUpdate {
            max_spiciness: Some(Spiciness::new(level)),
            ..Default::default()
        }
    }

    /// Category selection from the ribbon. The empty id means "All".
    pub fn category(id: &str) -> Self {
        let category = if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        };
        FilterUpdate {
            category: Some(category),
            ..Default::default()
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Returns the products matching `criteria`, in catalog order.
pub fn apply(catalog: &[Arc<Product>], criteria: &FilterCriteria) -> Vec<Arc<Product>> {
    catalog
        .iter()
        .filter(|product| criteria.matches(product))
        .cloned()
        .collect()
}

/// Criteria state plus the pure [`apply`] step.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    criteria: FilterCriteria,
}

impl FilterPipeline {
    pub fn new(criteria: FilterCriteria) -> Self {
        FilterPipeline { criteria }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Merges `update` and returns the criteria now in effect.
    pub fn update(&mut self, update: FilterUpdate) -> &FilterCriteria {
        self.criteria.merge(update);
        &self.criteria
    }

    pub fn apply(&self, catalog: &[Arc<Product>]) -> Vec<Arc<Product>> {
        apply(catalog, &self.criteria)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(id: &str) -> Product {
        Product::new(id, id, Money::from_cents(100), format!("{id}.png"))
    }

    fn catalog() -> Vec<Arc<Product>> {
        vec![
            Arc::new(item("laab").with_nuts(true).with_spiciness(2).with_category("salads")),
            Arc::new(item("tom-yam").with_spiciness(3).with_category("soups")),
            Arc::new(item("som-tam").with_nuts(true).with_vegetarian(true).with_category("salads")),
            Arc::new(item("rice").with_nuts(false).with_vegetarian(true).with_spiciness(0)),
            Arc::new(item("plain")),
        ]
    }

    fn ids(products: &[Arc<Product>]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_default_criteria_pass_everything() {
        let catalog = catalog();
        let result = apply(&catalog, &FilterCriteria::default());
        assert_eq!(result.len(), catalog.len());
    }

    #[test]
    fn test_exclude_nuts_keeps_order() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            exclude_nuts: true,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["tom-yam", "rice", "plain"]);
    }

    #[test]
    fn test_vegetarian_only_lets_unknown_through() {
        let catalog = vec![
            Arc::new(item("veg").with_vegetarian(true)),
            Arc::new(item("meat").with_vegetarian(false)),
            Arc::new(item("unknown")),
        ];
        let criteria = FilterCriteria {
            vegetarian_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["veg", "unknown"]);
    }

    #[test]
    fn test_max_spiciness() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            max_spiciness: Some(Spiciness::new(2)),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["laab", "som-tam", "rice", "plain"]);

        let strict = FilterCriteria {
            max_spiciness: Some(Spiciness::new(0)),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog, &strict)), vec!["som-tam", "rice", "plain"]);
    }

    #[test]
    fn test_category_requires_exact_match() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            category: Some("salads".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["laab", "som-tam"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            exclude_nuts: true,
            vegetarian_only: true,
            max_spiciness: Some(Spiciness::new(1)),
            category: None,
        };
        assert_eq!(ids(&apply(&catalog, &criteria)), vec!["rice", "plain"]);
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut criteria = FilterCriteria::default();
        criteria.merge(FilterUpdate::exclude_nuts(true));
        criteria.merge(FilterUpdate::max_spiciness(3));
        criteria.merge(FilterUpdate::category("soups"));

        assert!(criteria.exclude_nuts);
        assert_eq!(criteria.max_spiciness, Some(Spiciness::new(3)));
        assert_eq!(criteria.category.as_deref(), Some("soups"));

        criteria.merge(FilterUpdate::category(""));
        assert_eq!(criteria.category, None);
        assert!(criteria.exclude_nuts);
    }

    #[test]
    fn test_pipeline_update_then_apply() {
        let catalog = catalog();
        let mut pipeline = FilterPipeline::default();
        pipeline.update(FilterUpdate::category("soups"));
        assert_eq!(ids(&pipeline.apply(&catalog)), vec!["tom-yam"]);

        pipeline.update(FilterUpdate::max_spiciness(2));
        assert!(pipeline.apply(&catalog).is_empty());
    }
}
