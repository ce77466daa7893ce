//! # Domain Types
//!
//! Catalog types shared by every storefront widget.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │    Category     │   │     Slide       │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id             │   │  id ("" = All)  │   │  id             │        │
//! │  │  name           │   │  name           │   │  name           │        │
//! │  │  price (Money)  │   └─────────────────┘   │  price (Money)  │        │
//! │  │  image          │                         │  image          │        │
//! │  │  category?      │   ┌─────────────────┐   └─────────────────┘        │
//! │  │  spiciness?  ───┼──►│   Spiciness     │                              │
//! │  │  nuts?          │   │  ordered level  │                              │
//! │  │  vegeterian?    │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Products are immutable once loaded. The catalog owns them behind `Arc`,
//! cart line items and the rendered grid hold clones of that `Arc`, never
//! copies of the product.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_price, validate_required, ValidationResult};

// =============================================================================
// Spiciness
// =============================================================================

/// Spiciness level on an ordered scale, `0` = not spicy.
///
/// The step slider's committed value is a `Spiciness` ceiling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Spiciness(u32);

impl Spiciness {
    #[inline]
    pub const fn new(level: u32) -> Self {
        Spiciness(level)
    }

    #[inline]
    pub const fn level(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Spiciness {
    fn from(level: u32) -> Self {
        Spiciness(level)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on offer.
///
/// JSON field names follow the catalog file (`nuts`, `vegeterian`), prices
/// are decimal euros on the wire and cents in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier, also the cart line item key.
    pub id: String,

    /// Display name shown on cards and in the checkout view.
    pub name: String,

    /// Unit price.
    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price: Money,

    /// Image file name, relative to the product image directory.
    pub image: String,

    /// Category id; `None` for uncategorised products.
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub spiciness: Option<Spiciness>,

    /// `Some(true)` when the product contains nuts.
    #[serde(default, rename = "nuts")]
    pub contains_nuts: Option<bool>,

    /// `Some(true)` when the product is vegetarian.
    #[serde(default, rename = "vegeterian")]
    pub is_vegetarian: Option<bool>,
}

impl Product {
    /// Builds a plain product with no optional attributes.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            category: None,
            spiciness: None,
            contains_nuts: None,
            is_vegetarian: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_spiciness(mut self, level: u32) -> Self {
        self.spiciness = Some(Spiciness::new(level));
        self
    }

    pub fn with_nuts(mut self, contains_nuts: bool) -> Self {
        self.contains_nuts = Some(contains_nuts);
        self
    }

    pub fn with_vegetarian(mut self, is_vegetarian: bool) -> Self {
        self.is_vegetarian = Some(is_vegetarian);
        self
    }

    /// Checks the fields every product must carry.
    ///
    /// ## Rules
    /// - `id`, `name`, `image` are non-blank
    /// - `price` is not negative
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("id", &self.id)?;
        validate_required("name", &self.name)?;
        validate_required("image", &self.image)?;
        validate_price("price", self.price)?;
        Ok(())
    }
}

// =============================================================================
// Category
// =============================================================================

/// A ribbon menu entry. The empty id stands for "All".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
        }
    }

    /// True for the catch-all entry that clears the category filter.
    pub fn is_all(&self) -> bool {
        self.id.is_empty()
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)
    }
}

// =============================================================================
// Slide
// =============================================================================

/// A carousel slide promoting one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Slide {
    pub id: String,
    pub name: String,
    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price: Money,
    pub image: String,
}

impl Slide {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Slide {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("id", &self.id)?;
        validate_required("name", &self.name)?;
        validate_required("image", &self.image)?;
        validate_price("price", self.price)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
