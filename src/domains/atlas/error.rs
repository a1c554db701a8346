//! Atlas-specific error types.

use thiserror::Error;

use crate::domains::geometry::GeometryError;

/// Result type for ArcGIS REST operations.
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Errors that can occur while querying ArcGIS feature layers.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The layer name is not in the catalog.
    #[error("Invalid layer name: {name}. Available layers: {available}")]
    UnknownLayer { name: String, available: String },

    /// The request could not be sent or the body could not be read.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// ArcGIS reported an error inside a 200 response body.
    #[error("ArcGIS service error {code}: {message}")]
    Service { code: i64, message: String },

    /// The spatial filter argument could not be used.
    #[error("Invalid spatial filter: {0}")]
    InvalidSpatialFilter(String),

    /// No state feature matched the requested name.
    #[error("State '{0}' not found or has no geometry.")]
    StateNotFound(String),

    /// The region query of a two-step spatial query matched no geometry.
    #[error("No region geometry matched the region query.")]
    NoRegion,

    /// The region geometry has no positions to bound.
    #[error("Region geometry has no coordinates to build an envelope from; target query not sent.")]
    NoEnvelope,

    /// A returned geometry could not be decoded.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

impl AtlasError {
    /// Create an invalid spatial filter error.
    pub fn invalid_filter(msg: impl Into<String>) -> Self {
        Self::InvalidSpatialFilter(msg.into())
    }
}
