//! Layer catalog resource.

use serde_json::json;

use super::ResourceDefinition;
use crate::domains::atlas::layers::LAYERS;
use crate::domains::resources::service::ResourceContent;

pub struct LayerCatalogResource;

impl ResourceDefinition for LayerCatalogResource {
    const URI: &'static str = "atlas://layers";
    const NAME: &'static str = "Layer Catalog";
    const DESCRIPTION: &'static str =
        "Living Atlas layers accepted by the query tools, with their REST endpoints";
    const MIME_TYPE: &'static str = "application/json";
    const CATALOG: bool = true;

    fn content() -> ResourceContent {
        let layers: Vec<_> = LAYERS
            .iter()
            .map(|layer| {
                json!({
                    "name": layer.name,
                    "url": layer.url,
                    "description": layer.description,
                })
            })
            .collect();
        ResourceContent::Json(json!({ "layers": layers }))
    }
}
