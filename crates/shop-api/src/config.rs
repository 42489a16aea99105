//! Client configuration and endpoint routing.

use crate::ApiError;
use serde::{Deserialize, Serialize};
use shop_commerce::Currency;
use shop_data::{join_url, EnvelopePolicy};
use std::fmt;

/// Default backend address of the single-service deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// REST resources the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Categories,
    Customers,
    Orders,
    Cart,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Products,
        Resource::Categories,
        Resource::Customers,
        Resource::Orders,
        Resource::Cart,
    ];

    /// First path segment of the resource.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Products => "products",
            Resource::Categories => "categories",
            Resource::Customers => "customers",
            Resource::Orders => "orders",
            Resource::Cart => "cart",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Per-resource base URL overrides, for deployments that run each resource
/// as its own service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<String>,
}

impl ServiceUrls {
    /// Override for a resource, if any.
    pub fn get(&self, resource: Resource) -> Option<&str> {
        match resource {
            Resource::Products => self.products.as_deref(),
            Resource::Categories => self.categories.as_deref(),
            Resource::Customers => self.customers.as_deref(),
            Resource::Orders => self.orders.as_deref(),
            Resource::Cart => self.cart.as_deref(),
        }
    }

    /// Set the override for a resource.
    pub fn set(&mut self, resource: Resource, url: impl Into<String>) {
        let slot = match resource {
            Resource::Products => &mut self.products,
            Resource::Categories => &mut self.categories,
            Resource::Customers => &mut self.customers,
            Resource::Orders => &mut self.orders,
            Resource::Cart => &mut self.cart,
        };
        *slot = Some(url.into());
    }

    /// Layer `other` on top of `self`; set fields in `other` win.
    pub fn merged(&self, other: &ServiceUrls) -> ServiceUrls {
        let mut out = self.clone();
        for resource in Resource::ALL {
            if let Some(url) = other.get(resource) {
                out.set(resource, url);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        Resource::ALL.iter().all(|r| self.get(*r).is_none())
    }
}

/// API client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL serving every resource without an override.
    pub base_url: String,
    /// Response framing used by the backend.
    pub envelope: EnvelopePolicy,
    /// Currency used to label amounts.
    pub currency: Currency,
    /// Per-resource base URLs.
    #[serde(skip_serializing_if = "ServiceUrls::is_empty")]
    pub services: ServiceUrls,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            envelope: EnvelopePolicy::default(),
            currency: Currency::default(),
            services: ServiceUrls::default(),
        }
    }
}

impl ApiConfig {
    /// Configuration for a single backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// One service per resource on localhost, as in the split deployment.
    pub fn microservices() -> Self {
        let mut services = ServiceUrls::default();
        services.set(Resource::Cart, "http://localhost:9091");
        services.set(Resource::Categories, "http://localhost:9092");
        services.set(Resource::Customers, "http://localhost:9093");
        services.set(Resource::Orders, "http://localhost:9094");
        services.set(Resource::Products, "http://localhost:9095");
        Self {
            base_url: "http://localhost:9090".to_string(),
            services,
            ..Self::default()
        }
    }

    pub fn with_envelope(mut self, envelope: EnvelopePolicy) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_service(mut self, resource: Resource, url: impl Into<String>) -> Self {
        self.services.set(resource, url);
        self
    }

    /// Check that every configured URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ApiError> {
        check_url("base_url", &self.base_url)?;
        for resource in Resource::ALL {
            if let Some(url) = self.services.get(resource) {
                check_url(resource.path(), url)?;
            }
        }
        Ok(())
    }

    /// Resolved routing table.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            base_url: self.base_url.clone(),
            services: self.services.clone(),
        }
    }
}

fn check_url(field: &str, url: &str) -> Result<(), ApiError> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ApiError::Config(format!(
            "{field}: expected an http(s) URL, got {url:?}"
        ))),
    }
}

/// Maps a resource and path to a full URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    services: ServiceUrls,
}

impl Endpoints {
    /// Base URL serving a resource.
    pub fn base_for(&self, resource: Resource) -> &str {
        self.services.get(resource).unwrap_or(&self.base_url)
    }

    /// Full URL for `path` below a resource, e.g. `url(Cart, "items/4")`.
    pub fn url(&self, resource: Resource, path: &str) -> String {
        let root = join_url(self.base_for(resource), resource.path());
        if path.is_empty() {
            root
        } else {
            join_url(&root, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routing() {
        let endpoints = ApiConfig::default().endpoints();
        assert_eq!(endpoints.url(Resource::Cart, ""), "http://localhost:8080/api/cart");
        assert_eq!(
            endpoints.url(Resource::Cart, "items/7"),
            "http://localhost:8080/api/cart/items/7"
        );
        assert_eq!(
            endpoints.url(Resource::Products, "category/2"),
            "http://localhost:8080/api/products/category/2"
        );
    }

    #[test]
    fn test_microservice_routing() {
        let endpoints = ApiConfig::microservices().endpoints();
        assert_eq!(endpoints.url(Resource::Cart, "count"), "http://localhost:9091/cart/count");
        assert_eq!(
            endpoints.url(Resource::Orders, "3/status"),
            "http://localhost:9094/orders/3/status"
        );
    }

    #[test]
    fn test_validate() {
        assert!(ApiConfig::default().validate().is_ok());
        assert!(ApiConfig::new("localhost:8080").validate().is_err());
        let config = ApiConfig::default().with_service(Resource::Cart, "ftp://cart");
        assert!(matches!(config.validate(), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_services_merge() {
        let base = ApiConfig::microservices().services;
        let mut over = ServiceUrls::default();
        over.set(Resource::Cart, "http://cart.internal");
        let merged = base.merged(&over);
        assert_eq!(merged.get(Resource::Cart), Some("http://cart.internal"));
        assert_eq!(merged.get(Resource::Products), Some("http://localhost:9095"));
    }

    #[test]
    fn test_config_deserialize() {
        let config: ApiConfig = serde_json::from_str(
            r#"{"base_url":"http://shop:8080/api","envelope":"wrapped","currency":"INR",
                "services":{"cart":"http://cart:9091"}}"#,
        )
        .unwrap();
        assert_eq!(config.envelope, EnvelopePolicy::Wrapped);
        assert_eq!(config.currency, Currency::INR);
        assert_eq!(config.endpoints().base_for(Resource::Cart), "http://cart:9091");
        assert_eq!(config.endpoints().base_for(Resource::Orders), "http://shop:8080/api");

        let config: ApiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ApiConfig::default());
    }
}
