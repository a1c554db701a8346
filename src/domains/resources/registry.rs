//! Resource registry.
//!
//! A new resource needs a file in `definitions/` and an entry in
//! `get_all_resources()`.

use rmcp::model::{AnnotateAble, RawResource};

use super::definitions::{
    LayerCatalogResource, ResourceDefinition, ServerInfoResource, StateTableResource,
};
use super::service::ResourceEntry;

fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
        catalog: R::CATALOG,
    }
}

/// Every registered resource, in listing order.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<LayerCatalogResource>(),
        build_resource::<StateTableResource>(),
        build_resource::<ServerInfoResource>(),
    ]
}

pub fn resource_uris() -> Vec<&'static str> {
    vec![
        LayerCatalogResource::URI,
        StateTableResource::URI,
        ServerInfoResource::URI,
    ]
}
