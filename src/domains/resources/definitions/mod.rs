//! Resource definitions, one file per resource.

mod layer_catalog;
mod server_info;
mod state_table;

pub use layer_catalog::LayerCatalogResource;
pub use server_info::ServerInfoResource;
pub use state_table::StateTableResource;

use super::service::ResourceContent;

/// Metadata and content of a resource.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    const DESCRIPTION: &'static str;

    const MIME_TYPE: &'static str;

    /// Whether the resource is part of the static catalog, hidden when
    /// catalog exposure is turned off.
    const CATALOG: bool = false;

    fn content() -> ResourceContent;
}
