//! # Order Types
//!
//! The delivery form, the request handed to an [`OrderEndpoint`], and the
//! receipt returned on success.
//!
//! ```text
//! OrderForm ──validate──► OrderRequest { order_id, form, total } ──► endpoint
//!                                                                      │ 2xx
//!                                                                      ▼
//!                                              OrderReceipt { order_id, total,
//!                                                             item_count,
//!                                                             submitted_at }
//! ```
//!
//! [`OrderEndpoint`]: crate::endpoint::OrderEndpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::validation::{validate_email, validate_required, ValidationResult};
use storefront_core::Money;
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Order Form
// =============================================================================

/// Delivery details entered in the checkout view. All fields are required.
///
/// Serializes to the form-encoded body `name=..&email=..&tel=..&address=..`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderForm {
    pub name: String,
    pub email: String,
    pub tel: String,
    pub address: String,
}

impl OrderForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        tel: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        OrderForm {
            name: name.into(),
            email: email.into(),
            tel: tel.into(),
            address: address.into(),
        }
    }

    /// Checks every field in form order; the first failure wins.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("name", &self.name)?;
        validate_email(&self.email)?;
        validate_required("tel", &self.tel)?;
        validate_required("address", &self.address)?;
        Ok(())
    }
}

// =============================================================================
// Request / Receipt
// =============================================================================

/// One submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub order_id: Uuid,
    pub form: OrderForm,
    /// Cart total when the submission started.
    pub total: Money,
    pub item_count: u64,
}

impl OrderRequest {
    pub fn new(form: OrderForm, total: Money, item_count: u64) -> Self {
        OrderRequest {
            order_id: Uuid::new_v4(),
            form,
            total,
            item_count,
        }
    }
}

/// Proof of an accepted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderReceipt {
    #[ts(type = "string")]
    pub order_id: Uuid,
    /// The total snapshotted at submission start.
    pub total: Money,
    #[ts(type = "number")]
    pub item_count: u64,
    #[ts(type = "string")]
    pub submitted_at: DateTime<Utc>,
}

impl OrderReceipt {
    pub fn for_request(request: &OrderRequest) -> Self {
        OrderReceipt {
            order_id: request.order_id,
            total: request.total,
            item_count: request.item_count,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ValidationError;

    fn santa() -> OrderForm {
        OrderForm::new("Santa Claus", "john@gmail.com", "+1234567", "North, Lapland, Snow Home")
    }

    #[test]
    fn test_valid_form() {
        assert!(santa().validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected_in_order() {
        let mut form = santa();
        form.tel = "  ".into();
        form.address = String::new();
        assert_eq!(
            form.validate(),
            Err(ValidationError::Required {
                field: "tel".to_string()
            })
        );
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut form = santa();
        form.email = "john".into();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_receipt_copies_request_snapshot() {
        let request = OrderRequest::new(santa(), Money::from_cents(1250), 4);
        let receipt = OrderReceipt::for_request(&request);
        assert_eq!(receipt.order_id, request.order_id);
        assert_eq!(receipt.total.cents(), 1250);
        assert_eq!(receipt.item_count, 4);
    }

    #[test]
    fn test_requests_get_distinct_ids() {
        let a = OrderRequest::new(santa(), Money::zero(), 0);
        let b = OrderRequest::new(santa(), Money::zero(), 0);
        assert_ne!(a.order_id, b.order_id);
    }
}
