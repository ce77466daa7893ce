//! # Validation Module
//!
//! Construction-time and form validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                       │
//! │  ├── Field presence and JSON types                                      │
//! │  └── Price conversion to integer cents                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Non-empty identifiers and names                                    │
//! │  ├── Non-negative prices                                                │
//! │  └── Slider step bounds, non-empty lists                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Widget constructors                                           │
//! │  └── Refuse to build in a broken state (InvalidArgument)                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Runtime interaction (clicks, keys, drags, unknown ids) is never validated
//! here: it is clamped or ignored by the state machines themselves.

use crate::error::ValidationError;
use crate::money::Money;
use crate::MIN_SLIDER_STEPS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is present (non-blank).
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_required;
///
/// assert!(validate_required("name", "Laab kai chicken salad").is_ok());
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be blank
/// - Must have a non-empty local part and a domain around a single `@`
///
/// Matches what a browser's `type="email"` input enforces, nothing stricter.
pub fn validate_email(value: &str) -> ValidationResult<()> {
    validate_required("email", value)?;

    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected name@domain".to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog price.
///
/// ## Rules
/// - Zero is allowed (free items)
/// - Negative prices are rejected
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a slider step count.
///
/// ## Rules
/// - At least [`MIN_SLIDER_STEPS`] positions, otherwise there is no track
pub fn validate_slider_steps(steps: u32) -> ValidationResult<()> {
    if steps < MIN_SLIDER_STEPS {
        return Err(ValidationError::TooSmall {
            field: "steps".to_string(),
            min: MIN_SLIDER_STEPS as i64,
        });
    }
    Ok(())
}

/// Validates a signed initial slider value before it is clamped.
pub fn validate_slider_value(value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: "value".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that a list handed to a widget constructor has entries.
pub fn validate_non_empty<T>(field: &str, items: &[T]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
