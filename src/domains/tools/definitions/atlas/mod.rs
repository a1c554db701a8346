//! Tools that query Living Atlas layers.

pub mod layer_fields;
pub mod query_geojson;
pub mod query_layer;
pub mod state_geometry;
pub mod within_region;

pub use layer_fields::{LayerFieldsParams, LayerFieldsTool};
pub use query_geojson::{QueryGeoJsonParams, QueryGeoJsonTool};
pub use query_layer::{QueryLayerParams, QueryLayerTool};
pub use state_geometry::{StateGeometryParams, StateGeometryTool};
pub use within_region::{WithinRegionParams, WithinRegionTool};
