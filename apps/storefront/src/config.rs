//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     STOREFRONT_CATALOG_PATH=./products.json                             │
//! │     STOREFRONT_ORDER_URL=https://orders.example.com/intake              │
//! │     STOREFRONT_ORDER_TIMEOUT_SECS=5                                     │
//! │     STOREFRONT_SLIDER_STEPS=5   STOREFRONT_SLIDER_VALUE=3               │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/storefront/storefront.toml (Linux)                        │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     bundled catalog, 5-step slider at 3, httpbin order intake           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [catalog]
//! products_path = "/srv/storefront/products.json"
//! categories_path = "/srv/storefront/categories.json"
//! slides_path = "/srv/storefront/slides.json"
//!
//! [slider]
//! steps = 5
//! value = 3
//!
//! [checkout]
//! endpoint_url = "https://httpbin.org/post"
//! timeout_secs = 10
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_checkout::endpoint::parse_order_url;
use storefront_checkout::{DEFAULT_ORDER_TIMEOUT, DEFAULT_ORDER_URL};
use storefront_core::SliderConfig;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

// =============================================================================
// Sections
// =============================================================================

/// Where catalog data comes from. `None` uses the bundled data set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub products_path: Option<PathBuf>,
    #[serde(default)]
    pub categories_path: Option<PathBuf>,
    #[serde(default)]
    pub slides_path: Option<PathBuf>,
}

/// Order intake settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint_url() -> String {
    DEFAULT_ORDER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_ORDER_TIMEOUT.as_secs()
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            endpoint_url: default_endpoint_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CheckoutSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Full app configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub slider: SliderConfig,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_toml(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigLoad(e.to_string()))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        self.slider
            .validate()
            .map_err(|e| AppError::InvalidConfig(format!("slider: {e}")))?;

        parse_order_url(&self.checkout.endpoint_url)
            .map_err(|e| AppError::InvalidConfig(format!("checkout.endpoint_url: {e}")))?;

        if self.checkout.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "checkout.timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, which maps variable names to values.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STOREFRONT_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.products_path = Some(PathBuf::from(path));
        }

        if let Some(url) = lookup("STOREFRONT_ORDER_URL") {
            debug!(url = %url, "Overriding order URL from environment");
            self.checkout.endpoint_url = url;
        }

        if let Some(secs) = lookup("STOREFRONT_ORDER_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.checkout.timeout_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric STOREFRONT_ORDER_TIMEOUT_SECS"),
            }
        }

        if let Some(steps) = lookup("STOREFRONT_SLIDER_STEPS") {
            match steps.parse::<u32>() {
                Ok(steps) => self.slider.steps = steps,
                Err(_) => warn!(value = %steps, "Ignoring non-numeric STOREFRONT_SLIDER_STEPS"),
            }
        }

        if let Some(value) = lookup("STOREFRONT_SLIDER_VALUE") {
            match value.parse::<i64>() {
                Ok(value) => self.slider.value = value,
                Err(_) => warn!(value = %value, "Ignoring non-numeric STOREFRONT_SLIDER_VALUE"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.slider, SliderConfig { steps: 5, value: 3 });
        assert_eq!(config.checkout.endpoint_url, DEFAULT_ORDER_URL);
        assert!(config.catalog.products_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.slider.steps = 1;
        assert!(config.validate().is_err());

        config.slider.steps = 5;
        config.checkout.endpoint_url = "ws://orders".into();
        assert!(config.validate().is_err());

        config.checkout.endpoint_url = DEFAULT_ORDER_URL.into();
        config.checkout.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StorefrontConfig::from_toml(
            r#"
            [slider]
            steps = 7

            [checkout]
            endpoint_url = "http://127.0.0.1:9000/orders"
            "#,
        )
        .unwrap();

        assert_eq!(config.slider.steps, 7);
        assert_eq!(config.slider.value, 0);
        assert_eq!(config.checkout.endpoint_url, "http://127.0.0.1:9000/orders");
        assert_eq!(config.checkout.timeout_secs, DEFAULT_ORDER_TIMEOUT.as_secs());
    }

    #[test]
    fn test_bad_toml_is_config_load_error() {
        let err = StorefrontConfig::from_toml("[slider]\nsteps = \"many\"").unwrap_err();
        assert!(matches!(err, AppError::ConfigLoad(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STOREFRONT_CATALOG_PATH", "/tmp/products.json"),
            ("STOREFRONT_ORDER_URL", "http://localhost:8080/post"),
            ("STOREFRONT_ORDER_TIMEOUT_SECS", "3"),
            ("STOREFRONT_SLIDER_STEPS", "6"),
            ("STOREFRONT_SLIDER_VALUE", "nope"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.products_path, Some(PathBuf::from("/tmp/products.json")));
        assert_eq!(config.checkout.endpoint_url, "http://localhost:8080/post");
        assert_eq!(config.checkout.timeout(), Duration::from_secs(3));
        assert_eq!(config.slider.steps, 6);
        assert_eq!(config.slider.value, 3);
    }
}
