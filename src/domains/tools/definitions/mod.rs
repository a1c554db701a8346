//! Tool definitions, one file per tool.

pub mod atlas;
pub mod common;
pub mod maps;

pub use atlas::{
    LayerFieldsTool, QueryGeoJsonTool, QueryLayerTool, StateGeometryTool, WithinRegionTool,
};
pub use maps::{
    ArcgisAppTool, ArcgisAppWithRiversTool, DisplayGeoJsonTool, EmbeddableMapTool,
    WaterContextTool,
};
