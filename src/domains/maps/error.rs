//! Map page errors.

use std::path::PathBuf;
use thiserror::Error;

pub type MapResult<T> = Result<T, MapError>;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not valid JSON: {source}")]
    InvalidGeoJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No features found in GeoJSON.")]
    NoFeatures,

    #[error("State not found in GeoJSON properties.")]
    MissingState,

    /// A template placeholder had no value, or was never closed.
    #[error("Template '{template}': {message}")]
    Template {
        template: &'static str,
        message: String,
    },

    #[error("Failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl MapError {
    pub fn template(template: &'static str, message: impl Into<String>) -> Self {
        Self::Template {
            template,
            message: message.into(),
        }
    }
}
