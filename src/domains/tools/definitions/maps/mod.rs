//! Tools that build or display maps from GeoJSON.

pub mod arcgis_app;
pub mod arcgis_app_rivers;
pub mod display_geojson;
pub mod embeddable_map;
pub mod water_context;

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::security::{validate_output_path, validate_path};
use crate::domains::maps::{MapPage, MapResult, load_geojson, open_in_browser};

pub use arcgis_app::ArcgisAppTool;
pub use arcgis_app_rivers::ArcgisAppWithRiversTool;
pub use display_geojson::DisplayGeoJsonTool;
pub use embeddable_map::{EmbeddableMapParams, EmbeddableMapTool};
pub use water_context::WaterContextTool;

/// Parameters shared by the tools that take a GeoJSON file.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GeoJsonFileParams {
    /// Absolute path to a GeoJSON file, e.g. one written by query_layer_geojson.
    pub geojson_path: String,
}

/// A page written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedPage {
    pub path: PathBuf,
    pub state: Option<String>,
    pub opened: bool,
}

impl PublishedPage {
    /// "`<what>` created and opened: `<path>`", or without "and opened".
    pub fn message(&self, what: &str) -> String {
        if self.opened {
            format!("{} created and opened: {}", what, self.path.display())
        } else {
            format!("{} created: {}", what, self.path.display())
        }
    }
}

/// Read the GeoJSON, build a page, write it to the output directory and
/// open it when configured to.
pub(crate) fn publish_page(
    params: &GeoJsonFileParams,
    config: &Config,
    build: fn(&Value) -> MapResult<MapPage>,
) -> Result<PublishedPage, String> {
    let input = validate_path(&params.geojson_path, &config.security)
        .map_err(|e| format!("Path security validation failed: {}", e))?;
    let geojson = load_geojson(&input).map_err(|e| format!("Error: {}", e))?;
    let page = build(&geojson).map_err(|e| format!("Error: {}", e))?;

    let target = config.atlas.output_dir.join(page.file_name);
    let target = validate_output_path(&target, &config.security)
        .map_err(|e| format!("Path security validation failed: {}", e))?;
    let path = page.write_to(&target).map_err(|e| format!("Error: {}", e))?;
    info!("Wrote {}", path.display());

    let opened = config.atlas.open_browser
        && match open_in_browser(&path) {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not open browser: {}", e);
                false
            }
        };

    Ok(PublishedPage {
        path,
        state: page.state,
        opened,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    /// A config writing into a fresh temp dir with the browser disabled,
    /// plus a gauges GeoJSON file inside it.
    pub fn workspace() -> (TempDir, Config, GeoJsonFileParams) {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.atlas.output_dir = dir.path().to_path_buf();
        config.atlas.open_browser = false;

        let geojson = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-77.03, 38.9] },
                  "properties": { "state": "DC", "status": "no_flooding", "gaugelid": "WASD2" } }
            ]
        });
        let input = dir.path().join("dc_usgs.geojson");
        fs::write(&input, geojson.to_string()).unwrap();

        let params = GeoJsonFileParams {
            geojson_path: input.to_string_lossy().into_owned(),
        };
        (dir, config, params)
    }
}
