//! # Widgets
//!
//! Headless storefront widgets. Each one owns its state and its outgoing
//! event channels, and knows nothing about the others.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Widget Channels                                      │
//! │                                                                         │
//! │  Carousel ───────── product-add ──────┐                                 │
//! │  ProductsGrid ───── product-add ──────┤                                 │
//! │  RibbonMenu ─────── ribbon-select ────┤                                 │
//! │  StepSlider ─────── slider-change ────┼──► EventCoordinator             │
//! │  FilterCheckbox ─── *-filter-change ──┤                                 │
//! │  CartIcon ───────── cart-open ────────┤                                 │
//! │  CheckoutView ───── cart-adjust ──────┘                                 │
//! │                                                                         │
//! │  CartStore ──────── cart-update ──────► CartIcon, CheckoutView          │
//! │  Viewport ───────── pointer ──────────► StepSlider (during a drag only) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is reduced to serializable view states; there is no markup.

mod cart_icon;
mod carousel;
mod checkbox;
mod checkout_view;
mod product_grid;
mod ribbon;
mod step_slider;
mod viewport;

pub use cart_icon::{CartIcon, CartIconView};
pub use carousel::{Carousel, CarouselArrows};
pub use checkbox::FilterCheckbox;
pub use checkout_view::{
    CartAdjust, CheckoutLine, CheckoutView, CheckoutViewState, ORDER_TITLE, SUCCESS_MESSAGE, SUCCESS_TITLE,
};
pub use product_grid::{ProductCard, ProductsGrid};
pub use ribbon::{arrow_visibility, ArrowVisibility, RibbonMenu};
pub use step_slider::{SliderTarget, StepSlider};
pub use viewport::{PointerEvent, Viewport};
