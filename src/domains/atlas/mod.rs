//! Living Atlas domain module.
//!
//! Everything needed to talk to public ArcGIS feature layers:
//!
//! - `layers.rs` - Static catalog of known layer names and REST URLs
//! - `states.rs` - US state abbreviation and name lookup table
//! - `query.rs` - Query parameters and spatial filters
//! - `client.rs` - Blocking HTTP client for the ArcGIS REST API
//! - `features.rs` - Query response to GeoJSON conversion
//! - `error.rs` - Atlas-specific error types

mod client;
mod error;
mod features;
pub mod layers;
mod query;
pub mod states;

pub use client::{AtlasClient, first_geometry};
pub use error::{AtlasError, AtlasResult};
pub use features::features_to_geojson;
pub use layers::Layer;
pub use query::{LayerQuery, SpatialFilter, sql_string_literal};
