//! # Order Endpoint
//!
//! The seam between the cart store and the order-intake service.
//!
//! ```text
//! CartStore::submit_order
//!       │
//!       ▼
//! dyn OrderEndpoint ──────► HttpOrderEndpoint ──POST form──► order intake
//!       ▲                                          2xx  → Ok(())
//!       │                                          else → Rejected { status }
//!  test doubles                                    I/O  → Transport
//! ```
//!
//! One call is one request. Nothing here retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CheckoutError, CheckoutResult};
use crate::order::OrderRequest;

/// Where orders go when nothing else is configured.
pub const DEFAULT_ORDER_URL: &str = "https://httpbin.org/post";

/// Request timeout when nothing else is configured.
pub const DEFAULT_ORDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Accepts a submitted order.
#[async_trait]
pub trait OrderEndpoint: Send + Sync {
    /// Sends one order. `Ok` means the intake service accepted it.
    async fn submit(&self, order: &OrderRequest) -> CheckoutResult<()>;
}

// =============================================================================
// HTTP Endpoint
// =============================================================================

/// Posts the order form as `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct HttpOrderEndpoint {
    http: Client,
    url: Url,
}

impl HttpOrderEndpoint {
    /// Builds an endpoint for `url` with a per-request `timeout`.
    ///
    /// ## Errors
    /// `InvalidEndpoint` when the URL does not parse or is not http(s).
    pub fn new(url: &str, timeout: Duration) -> CheckoutResult<Self> {
        let url = parse_order_url(url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CheckoutError::InvalidEndpoint(e.to_string()))?;
        Ok(HttpOrderEndpoint { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Parses an order URL, accepting only `http` and `https`.
pub fn parse_order_url(url: &str) -> CheckoutResult<Url> {
    let parsed = Url::parse(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(CheckoutError::InvalidEndpoint(format!(
            "unsupported scheme '{other}' in {url}"
        ))),
    }
}

#[async_trait]
impl OrderEndpoint for HttpOrderEndpoint {
    async fn submit(&self, order: &OrderRequest) -> CheckoutResult<()> {
        debug!(order_id = %order.order_id, url = %self.url, "checkout: posting order");

        let response = self
            .http
            .post(self.url.clone())
            .form(&order.form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(order_id = %order.order_id, status = status.as_u16(), "checkout: order rejected");
            return Err(CheckoutError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!(order_id = %order.order_id, status = status.as_u16(), "checkout: order accepted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
