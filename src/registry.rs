//! Service registry loading

use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use tracing::{info, warn};

/// A monitored backend service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Display name
    pub name: String,
    /// Absolute health-check URL
    pub url: String,
}

impl ServiceEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Immutable mapping from service key to its entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceRegistry {
    services: BTreeMap<String, ServiceEntry>,
}

impl ServiceRegistry {
    pub fn new(services: BTreeMap<String, ServiceEntry>) -> Self {
        Self { services }
    }

    /// Read a registry from a JSON file of the form `{"key": {"name": .., "url": ..}}`
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let registry = serde_json::from_str(&raw)?;
        Ok(registry)
    }

    /// Read the registry file, falling back to the built-in services on any failure
    pub fn load_or_fallback(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(registry) => {
                info!(
                    "Loaded {} services from {}",
                    registry.len(),
                    path.display()
                );
                registry
            }
            Err(e) => {
                warn!(
                    "Could not load service registry from {} ({}), using built-in services",
                    path.display(),
                    e
                );
                Self::fallback()
            }
        }
    }

    /// Built-in services with URLs taken from the environment where set
    pub fn fallback() -> Self {
        Self::fallback_with(|name| env::var(name).ok())
    }

    pub fn fallback_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        let services = [
            (
                "tenantservice",
                ServiceEntry::new(
                    "TenantService",
                    url(
                        "TENANT_SERVICE_URL",
                        "http://oriso-platform-tenantservice.caritas.svc.cluster.local:8081/actuator/health",
                    ),
                ),
            ),
            (
                "userservice",
                ServiceEntry::new(
                    "UserService",
                    url(
                        "USER_SERVICE_URL",
                        "http://oriso-platform-userservice.caritas.svc.cluster.local:8082/actuator/health",
                    ),
                ),
            ),
            (
                "consultingtypeservice",
                ServiceEntry::new(
                    "ConsultingTypeService",
                    url(
                        "CONSULTING_TYPE_SERVICE_URL",
                        "http://oriso-platform-consultingtypeservice.caritas.svc.cluster.local:8083/actuator/health",
                    ),
                ),
            ),
            (
                "agencyservice",
                ServiceEntry::new(
                    "AgencyService",
                    url(
                        "AGENCY_SERVICE_URL",
                        "http://oriso-platform-agencyservice.caritas.svc.cluster.local:8084/actuator/health",
                    ),
                ),
            ),
            (
                "liveservice",
                ServiceEntry::new("LiveService", "http://localhost:8085/actuator/health"),
            ),
            (
                "statisticsservice",
                ServiceEntry::new("StatisticsService", "http://localhost:8086/actuator/health"),
            ),
            (
                "keycloak",
                ServiceEntry::new("Keycloak", "http://localhost:8080/health"),
            ),
            (
                "cobproxy",
                ServiceEntry::new("Nginx Proxy", "http://localhost:8089/service/tenant/access"),
            ),
        ];

        Self::new(
            services
                .into_iter()
                .map(|(key, entry)| (key.to_string(), entry))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&ServiceEntry> {
        self.services.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ServiceEntry)> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl FromIterator<(String, ServiceEntry)> for ServiceRegistry {
    fn from_iter<I: IntoIterator<Item = (String, ServiceEntry)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
