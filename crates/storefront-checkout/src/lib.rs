//! # storefront-checkout: Cart Store and Order Submission
//!
//! Wraps the pure [`storefront_core::Cart`] in an observable store that also
//! owns the checkout view's lifecycle and the asynchronous order submission.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   coordinator ──add/adjust──► ┌──────────────────────────┐              │
//! │                               │        CartStore         │              │
//! │   cart icon   ──open────────► │                          │              │
//! │                               │  Cart + CheckoutPhase    │── updates ──►│ icon, view
//! │   checkout    ──submit──────► │  in-flight guard         │              │
//! │    view                       └────────────┬─────────────┘              │
//! │                                            │ &OrderRequest              │
//! │                                            ▼                            │
//! │                               ┌──────────────────────────┐              │
//! │                               │   dyn OrderEndpoint      │              │
//! │                               │   HttpOrderEndpoint      │──► POST form │
//! │                               └──────────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`store`] - `CartStore`, `CheckoutPhase`, `CartUpdate`
//! - [`endpoint`] - `OrderEndpoint` trait and the reqwest implementation
//! - [`order`] - Order form, request and receipt
//! - [`error`] - Checkout error types

pub mod endpoint;
pub mod error;
pub mod order;
pub mod store;

pub use endpoint::{HttpOrderEndpoint, OrderEndpoint, DEFAULT_ORDER_TIMEOUT, DEFAULT_ORDER_URL};
pub use error::{CheckoutError, CheckoutResult};
pub use order::{OrderForm, OrderReceipt, OrderRequest};
pub use store::{CartEvent, CartStore, CartUpdate, CheckoutPhase};
