//! Swagger 1.2 resource listing.
//!
//! The resource listing is the root document of a Swagger 1.2 API: it names every
//! service's API declaration so that clients can fetch them one by one.

use crate::declaration_builder::SWAGGER_VERSION;
use crate::descriptor::{ApiDescriptor, ServiceDescriptor};
use log::debug;
use serde::{Deserialize, Serialize};

/// Swagger 1.2 resource listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListing {
    pub api_version: String,
    pub swagger_version: String,
    pub apis: Vec<ResourceReference>,
}

/// Pointer to one service's API declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    pub path: String,
    pub description: String,
}

impl ResourceReference {
    fn for_service(service: &ServiceDescriptor) -> Self {
        let description = if service.description.is_empty() {
            format!("Operations about {}", service.name)
        } else {
            service.description.clone()
        };

        Self {
            path: format!("/{}", service.name),
            description,
        }
    }
}

pub struct ResourceListingBuilder;

impl ResourceListingBuilder {
    /// List every service of the API, in descriptor order
    pub fn build(api: &ApiDescriptor) -> ResourceListing {
        debug!(
            "Building resource listing for {} with {} services",
            api.name,
            api.services.len()
        );

        ResourceListing {
            api_version: api.version.clone(),
            swagger_version: SWAGGER_VERSION.to_string(),
            apis: api
                .services
                .iter()
                .map(ResourceReference::for_service)
                .collect(),
        }
    }
}
