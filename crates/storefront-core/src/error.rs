//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── CoreError        - Widget construction / domain errors             │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  storefront-checkout errors (separate crate)                            │
//! │  └── CheckoutError    - Checkout guard + order submission failures      │
//! │                                                                         │
//! │  App errors (apps/storefront)                                           │
//! │  └── AppError         - Config, catalog loading, command parsing        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError/AppError → User      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, field name)
//! 3. Errors are enum variants, never String
//! 4. Nothing here is retried; every variant is a caller mistake

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// Construction of a widget or a catalog with bad data fails with one of
/// these. Runtime interaction (clicks, keys, drags) never errors: bad input
/// there is clamped or ignored.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A constructor argument failed validation.
    ///
    /// ## When This Occurs
    /// - Slider built with fewer than 2 steps
    /// - Ribbon or carousel built from an empty list
    /// - Product record with an empty name or negative price
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Two products in one catalog share an id.
    ///
    /// Product ids are the cart's line item key, so they must be unique.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A product id referenced by the user is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when constructor input or form input doesn't meet
/// requirements. Used for early validation before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be at least a lower bound.
    #[error("{field} must be at least {min}")]
    TooSmall { field: String, min: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A list that must carry entries is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Invalid format (e.g., malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
