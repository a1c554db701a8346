//! Geometry decode errors.

use thiserror::Error;

/// Errors raised while decoding Esri JSON coordinates into numbers.
///
/// Translation to GeoJSON never decodes coordinates; only envelope
/// computation does.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// An `x` or `y` ordinate was not a number.
    #[error("Coordinate '{key}' is not numeric: {value}")]
    NonNumeric { key: &'static str, value: String },

    /// A coordinate array did not have the nesting of `rings`.
    #[error("Malformed '{key}' coordinates: {source}")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Position needs at least 2 ordinates, got {len}")]
    ShortPosition { len: usize },
}

impl GeometryError {
    /// Create a non-numeric coordinate error.
    pub fn non_numeric(key: &'static str, value: &serde_json::Value) -> Self {
        Self::NonNumeric {
            key,
            value: value.to_string(),
        }
    }

    pub fn short_position(len: usize) -> Self {
        Self::ShortPosition { len }
    }

    /// Create a malformed coordinate array error.
    pub fn malformed(key: &'static str, source: serde_json::Error) -> Self {
        Self::Malformed { key, source }
    }
}
