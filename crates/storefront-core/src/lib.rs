//! # storefront-core: Pure Interaction Logic for the Storefront
//!
//! This crate holds the storefront's state machines as plain data and pure
//! functions. Nothing in here performs I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 apps/storefront (widgets + coordinator)         │    │
//! │  │   Carousel  Ribbon  StepSlider  ProductsGrid  CartIcon  Checkout│    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │          storefront-checkout (CartStore, order endpoint)        │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │    │
//! │  │                                                                 │    │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌─────────┐           │    │
//! │  │   │  cart   │  │ filter  │  │  slider  │  │ events  │           │    │
//! │  │   │  Cart   │  │Criteria │  │ Gesture  │  │ Channel │           │    │
//! │  │   │LineItem │  │ apply() │  │ preview/ │  │ Subscr- │           │    │
//! │  │   │         │  │         │  │ commit   │  │ iption  │           │    │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └─────────┘           │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO NETWORK • NO FILES • SYNCHRONOUS                  │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Category, Slide)
//! - [`money`] - Integer-cent money
//! - [`cart`] - Line items and derived totals
//! - [`filter`] - Compound product filter
//! - [`slider`] - Step slider gesture state machine
//! - [`events`] - Typed pub/sub channels with RAII subscriptions
//! - [`error`] - Domain error types
//! - [`validation`] - Construction-time validation
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront_core::{Cart, Money, Product};
//!
//! let laab = Arc::new(Product::new("laab", "Laab kai", Money::from_cents(700), "laab.png"));
//!
//! let mut cart = Cart::new();
//! cart.add_product(Some(laab.clone()));
//! cart.add_product(Some(laab));
//!
//! assert_eq!(cart.total_count(), 2);
//! assert_eq!(cart.total_price().to_string(), "€14.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod events;
pub mod filter;
pub mod money;
pub mod slider;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSnapshot, LineItem, LineItemChange, LineItemChangeKind, LineItemSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use events::{EventChannel, EventName, Subscription};
pub use filter::{FilterCriteria, FilterPipeline, FilterUpdate};
pub use money::Money;
pub use slider::{SliderConfig, SliderGesture, SliderSnapshot, StepDirection};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fewest positions a step slider can have.
pub const MIN_SLIDER_STEPS: u32 = 2;
