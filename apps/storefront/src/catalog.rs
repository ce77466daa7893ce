//! # Catalog
//!
//! Products, ribbon categories and carousel slides, loaded once at startup.
//!
//! ```text
//! [catalog] products_path ──► read file ──┐
//!           (unset) ──► bundled JSON ─────┼──► JSON records ──► required fields ──► serde ──► validate ──► Catalog
//!                                         │                     missing ✗                     dup ids ✗
//! ```
//!
//! A record missing a required field is an `InvalidArgument`, the same as a
//! blank one; only unreadable or mistyped JSON is a catalog load error.
//!
//! Products are shared as `Arc<Product>`: the grid, its cards and cart line
//! items all reference the same allocation.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_core::{Category, CoreError, Product, Slide, ValidationError};
use tracing::{debug, info};

use crate::config::CatalogSettings;
use crate::error::{AppError, AppResult};

const BUNDLED_PRODUCTS: &str = include_str!("../data/products.json");
const BUNDLED_CATEGORIES: &str = include_str!("../data/categories.json");
const BUNDLED_SLIDES: &str = include_str!("../data/slides.json");

/// Everything the storefront displays.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    categories: Vec<Category>,
    slides: Vec<Slide>,
}

impl Catalog {
    /// Builds a catalog from already-parsed parts, validating every record.
    ///
    /// ## Errors
    /// - `Core(InvalidArgument)` for a record with a blank required field
    /// - `Core(DuplicateProduct)` when two products share an id
    pub fn new(products: Vec<Product>, categories: Vec<Category>, slides: Vec<Slide>) -> AppResult<Self> {
        for category in &categories {
            category.validate().map_err(CoreError::from)?;
        }
        for slide in &slides {
            slide.validate().map_err(CoreError::from)?;
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate().map_err(CoreError::from)?;
            if !seen.insert(product.id.as_str()) {
                return Err(CoreError::DuplicateProduct(product.id.clone()).into());
            }
        }

        Ok(Catalog {
            products: products.into_iter().map(Arc::new).collect(),
            categories,
            slides,
        })
    }

    /// Parses the three JSON documents.
    pub fn from_json_strs(products: &str, categories: &str, slides: &str) -> AppResult<Self> {
        Self::new(
            parse_records("products", products)?,
            parse_records("categories", categories)?,
            parse_records("slides", slides)?,
        )
    }

    /// The data set compiled into the binary.
    pub fn bundled() -> AppResult<Self> {
        Self::from_json_strs(BUNDLED_PRODUCTS, BUNDLED_CATEGORIES, BUNDLED_SLIDES)
    }

    /// Loads each part from its configured path, falling back to the bundled
    /// document for any path left unset.
    pub fn load(settings: &CatalogSettings) -> AppResult<Self> {
        let products = read_or_bundled("products", settings.products_path.as_deref(), BUNDLED_PRODUCTS)?;
        let categories =
            read_or_bundled("categories", settings.categories_path.as_deref(), BUNDLED_CATEGORIES)?;
        let slides = read_or_bundled("slides", settings.slides_path.as_deref(), BUNDLED_SLIDES)?;

        let catalog = Self::from_json_strs(&products, &categories, &slides)?;
        info!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            slides = catalog.slides.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Looks a product up by id.
    pub fn product(&self, id: &str) -> Option<Arc<Product>> {
        self.products.iter().find(|p| p.id == id).cloned()
    }
}

/// A catalog JSON record and the keys it cannot do without.
trait CatalogRecord: DeserializeOwned {
    const REQUIRED: &'static [&'static str];
}

impl CatalogRecord for Product {
    const REQUIRED: &'static [&'static str] = &["id", "name", "price", "image"];
}

impl CatalogRecord for Category {
    const REQUIRED: &'static [&'static str] = &["name"];
}

impl CatalogRecord for Slide {
    const REQUIRED: &'static [&'static str] = &["id", "name", "price", "image"];
}

fn parse_records<T: CatalogRecord>(source_name: &str, contents: &str) -> AppResult<Vec<T>> {
    let records: Vec<Value> = serde_json::from_str(contents).map_err(|e| load_error(source_name, e))?;

    records
        .into_iter()
        .map(|record| {
            if let Some(fields) = record.as_object() {
                let missing = T::REQUIRED
                    .iter()
                    .find(|field| fields.get(**field).map_or(true, Value::is_null));
                if let Some(field) = missing {
                    let err = ValidationError::Required {
                        field: field.to_string(),
                    };
                    return Err(CoreError::from(err).into());
                }
            }
            serde_json::from_value(record).map_err(|e| load_error(source_name, e))
        })
        .collect()
}

fn load_error(source_name: &str, err: serde_json::Error) -> AppError {
    AppError::CatalogLoad {
        source_name: source_name.to_string(),
        reason: err.to_string(),
    }
}

fn read_or_bundled(source_name: &str, path: Option<&Path>, bundled: &str) -> AppResult<String> {
    match path {
        Some(path) => {
            debug!(?path, source_name, "Reading catalog file");
            std::fs::read_to_string(path).map_err(|e| AppError::CatalogLoad {
                source_name: format!("{source_name} ({})", path.display()),
                reason: e.to_string(),
            })
        }
        None => Ok(bundled.to_string()),
    }
}
