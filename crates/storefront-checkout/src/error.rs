//! # Checkout Error Types
//!
//! Error types for the cart store's checkout flow.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐  │
//! │  │  Precondition   │  │   Endpoint      │  │     Configuration       │  │
//! │  │                 │  │                 │  │                         │  │
//! │  │  AlreadyIn-     │  │  Rejected       │  │  InvalidEndpoint        │  │
//! │  │   Progress      │  │   (non-2xx)     │  │                         │  │
//! │  │  CheckoutClosed │  │  Transport      │  │                         │  │
//! │  │  CheckoutAlrea- │  │   (network,     │  │                         │  │
//! │  │   dyOpen        │  │    timeout)     │  │                         │  │
//! │  │  EmptyCart      │  │                 │  │                         │  │
//! │  │  InvalidForm    │  │                 │  │                         │  │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘  │
//! │                                                                         │
//! │  Precondition errors leave the cart and the checkout phase untouched.   │
//! │  Endpoint errors restore the phase to Open, the cart is never touched.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::ValidationError;
use thiserror::Error;

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Checkout error type.
#[derive(Debug, Error)]
pub enum CheckoutError {
    // =========================================================================
    // Precondition Errors
    // =========================================================================
    /// A submission is already in flight.
    #[error("An order submission is already in progress")]
    AlreadyInProgress,

    /// The checkout view is already open.
    #[error("Checkout is already open")]
    CheckoutAlreadyOpen,

    /// Submission requires an open checkout view.
    #[error("Checkout is not open")]
    CheckoutClosed,

    /// Nothing to order.
    #[error("Cannot submit an order for an empty cart")]
    EmptyCart,

    /// A form field failed validation.
    #[error("Invalid order form: {0}")]
    InvalidForm(#[from] ValidationError),

    // =========================================================================
    // Endpoint Errors
    // =========================================================================
    /// The endpoint answered with a non-2xx status.
    #[error("Order rejected with HTTP status {status}")]
    Rejected { status: u16 },

    /// The request never got a response (connect failure, timeout, ...).
    #[error("Order request failed: {0}")]
    Transport(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The configured endpoint URL cannot be used.
    #[error("Invalid order endpoint: {0}")]
    InvalidEndpoint(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => CheckoutError::Rejected {
                status: status.as_u16(),
            },
            None => CheckoutError::Transport(err.to_string()),
        }
    }
}

impl From<url::ParseError> for CheckoutError {
    fn from(err: url::ParseError) -> Self {
        CheckoutError::InvalidEndpoint(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CheckoutError {
    /// Returns true if resubmitting the same order may succeed.
    ///
    /// ## Retryable Errors
    /// - Transport failures and timeouts
    /// - 5xx, 408 and 429 responses
    ///
    /// Nothing retries automatically; the user resubmits.
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::Transport(_) => true,
            CheckoutError::Rejected { status } => {
                *status >= 500 || *status == 408 || *status == 429
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(CheckoutError::Transport("connection refused".into()).is_retryable());
        assert!(CheckoutError::Rejected { status: 503 }.is_retryable());
        assert!(CheckoutError::Rejected { status: 429 }.is_retryable());

        assert!(!CheckoutError::Rejected { status: 400 }.is_retryable());
        assert!(!CheckoutError::EmptyCart.is_retryable());
        assert!(!CheckoutError::AlreadyInProgress.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = CheckoutError::Rejected { status: 502 };
        assert_eq!(err.to_string(), "Order rejected with HTTP status 502");

        let err: CheckoutError = ValidationError::Required {
            field: "address".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Invalid order form: address is required");
    }
}
