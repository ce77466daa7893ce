//! # App Error Type
//!
//! Unified error type for the storefront app.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  startup                                                                │
//! │    config ── ConfigLoad / InvalidConfig ─────┐                          │
//! │    catalog ─ CatalogLoad / Core(Duplicate..) ┼──► AppError ──► exit 1   │
//! │    widgets ─ Core(InvalidArgument) ──────────┘                          │
//! │                                                                         │
//! │  command loop                                                           │
//! │    parse ─── UnknownCommand ─────────────────┐                          │
//! │    cart ──── Checkout(EmptyCart, ...) ───────┼──► AppError ──► printed  │
//! │    lookup ── Core(ProductNotFound) ──────────┘       "error[CODE]: .."  │
//! │                                                      loop continues     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each error carries a machine-readable [`ErrorCode`] next to its message.

use serde::Serialize;
use storefront_checkout::CheckoutError;
use storefront_core::CoreError;
use thiserror::Error;

/// App-level error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Reading or parsing `storefront.toml` failed.
    #[error("Failed to load config: {0}")]
    ConfigLoad(String),

    /// The configuration parsed but cannot be used.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A catalog file could not be read or parsed.
    #[error("Failed to load {source_name}: {reason}")]
    CatalogLoad { source_name: String, reason: String },

    /// A stdin line did not parse as a command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Result type alias for app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Error codes for printed and serialized errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad constructor or form input
    InvalidArgument,

    /// Unknown product id
    NotFound,

    /// Checkout precondition or submission failure
    CheckoutError,

    /// Configuration problem
    ConfigError,

    /// Catalog data problem
    CatalogError,

    /// Unparseable command
    UnknownCommand,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::CheckoutError => "CHECKOUT_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::UnknownCommand => "UNKNOWN_COMMAND",
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Core(CoreError::ProductNotFound(_)) => ErrorCode::NotFound,
            AppError::Core(CoreError::DuplicateProduct(_)) => ErrorCode::CatalogError,
            AppError::Core(CoreError::InvalidArgument(_)) => ErrorCode::InvalidArgument,
            AppError::Checkout(CheckoutError::InvalidForm(_)) => ErrorCode::InvalidArgument,
            AppError::Checkout(CheckoutError::InvalidEndpoint(_)) => ErrorCode::ConfigError,
            AppError::Checkout(_) => ErrorCode::CheckoutError,
            AppError::ConfigLoad(_) | AppError::InvalidConfig(_) => ErrorCode::ConfigError,
            AppError::CatalogLoad { .. } => ErrorCode::CatalogError,
            AppError::UnknownCommand(_) => ErrorCode::UnknownCommand,
        }
    }
}

/// What gets printed or serialized for a failed command.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Product not found: laab-kai" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&AppError> for ErrorReport {
    fn from(err: &AppError) -> Self {
        ErrorReport {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}
