//! CLI configuration.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shop_api::{ApiConfig, ServiceUrls};
use shop_commerce::Currency;
use shop_data::EnvelopePolicy;
use shop_observability::LogConfig;
use thiserror::Error;

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "SHOP_API_BASE_URL";

/// Name of the built-in split deployment variant.
pub const MICROSERVICES_VARIANT: &str = "microservices";

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariantError {
    #[error("Unknown variant '{name}' (known: {known})")]
    Unknown { name: String, known: String },
}

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Backend settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Log output settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Deployment variants overriding `[api]`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variants: BTreeMap<String, VariantConfig>,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// API settings for a variant, `[api]` when `variant` is `None`.
    ///
    /// A variant defined in the file wins over the built-in
    /// `microservices` layout of the same name.
    pub fn api_for(&self, variant: Option<&str>) -> Result<ApiConfig, VariantError> {
        let Some(name) = variant else {
            return Ok(self.api.clone());
        };

        match self.variants.get(name) {
            Some(overrides) => Ok(overrides.apply(&self.api)),
            None if name == MICROSERVICES_VARIANT => Ok(ApiConfig {
                envelope: self.api.envelope,
                currency: self.api.currency,
                ..ApiConfig::microservices()
            }),
            None => Err(VariantError::Unknown {
                name: name.to_string(),
                known: self.variant_names().join(", "),
            }),
        }
    }

    /// Variant names, built-in ones included.
    pub fn variant_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.variants.keys().cloned().collect();
        if !self.variants.contains_key(MICROSERVICES_VARIANT) {
            names.push(MICROSERVICES_VARIANT.to_string());
        }
        names
    }
}

/// Overrides for one deployment variant. Unset fields keep the `[api]` value;
/// services are layered per resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope: Option<EnvelopePolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    #[serde(default, skip_serializing_if = "ServiceUrls::is_empty")]
    pub services: ServiceUrls,
}

impl VariantConfig {
    /// Layer this variant on top of `base`.
    pub fn apply(&self, base: &ApiConfig) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone().unwrap_or_else(|| base.base_url.clone()),
            envelope: self.envelope.unwrap_or(base.envelope),
            currency: self.currency.unwrap_or(base.currency),
            services: base.services.merged(&self.services),
        }
    }
}

/// Replace the base URL with `value` when it is set and non-empty.
pub fn apply_base_url_override(mut api: ApiConfig, value: Option<String>) -> ApiConfig {
    if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        api.base_url = url;
    }
    api
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default shop.toml config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# Shop client configuration

[api]
base_url = "{base_url}"
# "bare" when the backend returns payloads as-is,
# "wrapped" when it returns {{ data, message, success }}
envelope = "bare"
currency = "USD"

# Per-resource overrides
# [api.services]
# cart = "http://localhost:9091"

[log]
level = "warn"
format = "human"

# Selected with --variant microservices
[variants.microservices]
base_url = "http://localhost:9090"

[variants.microservices.services]
cart = "http://localhost:9091"
categories = "http://localhost:9092"
customers = "http://localhost:9093"
orders = "http://localhost:9094"
products = "http://localhost:9095"
"#,
        base_url = base_url
    )
}
