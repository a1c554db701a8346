//! Map page generation.
//!
//! - `template.rs` - `{{variable}}` rendering and escaping helpers
//! - `context.rs` - Reading GeoJSON and deriving state / center
//! - `pages.rs` - The ArcGIS JS pages
//! - `launcher.rs` - Browser and external viewer processes

pub mod context;
mod error;
pub mod launcher;
pub mod pages;
mod template;

use std::fs;
use std::path::{Path, PathBuf};

pub use context::load_geojson;
pub use error::{MapError, MapResult};
pub use launcher::{ViewerOutcome, open_in_browser, run_viewer};
pub use pages::{
    MapPage, embeddable_water_map, geojson_app, geojson_with_rivers_app, water_context_app,
};
pub use template::MapTemplate;

impl MapPage {
    /// Write the page to `path`, replacing any previous version.
    pub fn write_to(&self, path: &Path) -> MapResult<PathBuf> {
        fs::write(path, &self.html).map_err(|source| MapError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(path.to_path_buf())
    }
}
