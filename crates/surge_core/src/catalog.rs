//! Service catalog: the fixed set of ride offerings being tracked.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Name of the shared-ride service, which gets its own surge bias.
pub const POOLED_SERVICE: &str = "UberPool";

/// Names of the premium services, which never surge past "high" when the
/// downgrade draw fires.
pub const PREMIUM_SERVICES: [&str; 2] = ["UberBlack", "UberSelect"];

/// One immutable catalog entry: defined at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub name: String,
    pub description: String,
    pub base_price: f64,
    pub icon: String,
}

impl ServiceDefinition {
    pub fn new(
        name: &str,
        description: &str,
        base_price: f64,
        icon: &str,
    ) -> Result<Self, String> {
        if base_price <= 0.0 {
            return Err(format!(
                "base price for {name} must be positive, got {base_price}"
            ));
        }
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            base_price,
            icon: icon.to_string(),
        })
    }

    pub fn is_pooled(&self) -> bool {
        self.name == POOLED_SERVICE
    }

    pub fn is_premium(&self) -> bool {
        PREMIUM_SERVICES.contains(&self.name.as_str())
    }
}

/// Ordered, immutable set of services. Generation output preserves this order.
#[derive(Debug, Clone, Resource)]
pub struct ServiceCatalog {
    services: Vec<ServiceDefinition>,
}

impl ServiceCatalog {
    /// Build a catalog, rejecting duplicate names and non-positive prices.
    pub fn new(services: Vec<ServiceDefinition>) -> Result<Self, String> {
        for (i, service) in services.iter().enumerate() {
            if service.base_price <= 0.0 {
                return Err(format!(
                    "base price for {} must be positive, got {}",
                    service.name, service.base_price
                ));
            }
            if services[..i].iter().any(|other| other.name == service.name) {
                return Err(format!("duplicate service name: {}", service.name));
            }
        }
        Ok(Self { services })
    }

    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        let services = vec![
            ServiceDefinition {
                name: "UberX".to_string(),
                description: "Affordable rides for up to 4 people".to_string(),
                base_price: 12.50,
                icon: "🚗".to_string(),
            },
            ServiceDefinition {
                name: "UberPool".to_string(),
                description: "Share your ride, split the cost".to_string(),
                base_price: 8.75,
                icon: "👥".to_string(),
            },
            ServiceDefinition {
                name: "UberXL".to_string(),
                description: "Extra room for up to 6 people".to_string(),
                base_price: 18.25,
                icon: "🚙".to_string(),
            },
            ServiceDefinition {
                name: "UberBlack".to_string(),
                description: "Premium rides with professional drivers".to_string(),
                base_price: 28.50,
                icon: "🚐".to_string(),
            },
            ServiceDefinition {
                name: "UberSelect".to_string(),
                description: "Newer cars with top-rated drivers".to_string(),
                base_price: 22.75,
                icon: "✨".to_string(),
            },
        ];
        Self { services }
    }
}
