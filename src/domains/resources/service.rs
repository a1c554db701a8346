//! Resource service: listing and reading registered resources.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::Config;

pub struct ResourceService {
    config: Arc<Config>,

    /// Registered resources, in listing order.
    resources: Vec<ResourceEntry>,
}

#[derive(Debug, Clone)]
pub struct ResourceEntry {
    pub resource: Resource,
    pub content: ResourceContent,

    /// Hidden when catalog exposure is turned off.
    pub catalog: bool,
}

#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static JSON, served pretty-printed.
    Json(Value),

    /// Content computed at read time.
    Dynamic(DynamicResourceType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicResourceType {
    ServerInfo,
}

impl ResourceService {
    pub fn new(config: Arc<Config>) -> Self {
        let expose_catalog = config.resources.expose_catalog;
        let resources: Vec<_> = get_all_resources()
            .into_iter()
            .filter(|entry| expose_catalog || !entry.catalog)
            .collect();

        info!(
            "ResourceService initialized with {} resources (catalog {})",
            resources.len(),
            if expose_catalog { "exposed" } else { "hidden" }
        );

        Self { config, resources }
    }

    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .iter()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .iter()
            .find(|entry| entry.resource.raw.uri == uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        debug!("Resolving resource {}", uri);
        let value = match &entry.content {
            ResourceContent::Json(value) => value.clone(),
            ResourceContent::Dynamic(dynamic) => self.resolve_dynamic(*dynamic),
        };

        let mut content = ResourceContents::text(serde_json::to_string_pretty(&value)?, uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut content {
            *mime_type = entry.resource.raw.mime_type.clone();
        }

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    fn resolve_dynamic(&self, dynamic: DynamicResourceType) -> Value {
        match dynamic {
            DynamicResourceType::ServerInfo => serde_json::json!({
                "name": self.config.server.name,
                "version": self.config.server.version,
                "output_dir": self.config.atlas.output_dir,
                "expose_catalog": self.config.resources.expose_catalog,
            }),
        }
    }
}
